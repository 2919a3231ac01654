use std::{fmt, sync::LazyLock, time::Duration};

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use url::Url;

use crate::{ContentError, ContentStore};

static PROJECT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid project id pattern"));
static DATASET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid dataset pattern"));

const DEFAULT_DATASET: &str = "production";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn default_dataset() -> String {
    DEFAULT_DATASET.to_string()
}

fn default_api_version() -> String {
    "2025-01-01".to_string()
}

fn default_use_cdn() -> bool {
    true
}

#[derive(Clone, Deserialize)]
pub struct SanitySettings {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub read_token: Option<String>,
    #[serde(default)]
    pub write_token: Option<String>,
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,
    /// Hosted Studio location; derived from the project id when unset.
    #[serde(default)]
    pub studio_url: Option<String>,
}

impl Default for SanitySettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            read_token: None,
            write_token: None,
            use_cdn: default_use_cdn(),
            studio_url: None,
        }
    }
}

impl fmt::Debug for SanitySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitySettings")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("read_token", &self.read_token.as_ref().map(|_| "<redacted>"))
            .field("write_token", &self.write_token.as_ref().map(|_| "<redacted>"))
            .field("use_cdn", &self.use_cdn)
            .field("studio_url", &self.studio_url)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl SanitySettings {
    pub fn project_id(&self) -> &str {
        self.project_id.trim()
    }

    pub fn dataset(&self) -> &str {
        match self.dataset.trim() {
            "" => DEFAULT_DATASET,
            dataset => dataset,
        }
    }

    pub fn has_valid_project_id(&self) -> bool {
        PROJECT_ID_PATTERN.is_match(self.project_id())
    }

    pub fn has_valid_dataset(&self) -> bool {
        DATASET_PATTERN.is_match(self.dataset())
    }

    pub fn is_configured(&self) -> bool {
        self.has_valid_project_id() && self.has_valid_dataset()
    }

    pub fn read_token(&self) -> Option<&str> {
        non_empty(&self.read_token)
    }

    pub fn write_token(&self) -> Option<&str> {
        non_empty(&self.write_token)
    }

    pub fn studio_url(&self) -> Option<String> {
        if let Some(url) = non_empty(&self.studio_url) {
            return Some(url.to_owned());
        }

        self.has_valid_project_id()
            .then(|| format!("https://{}.sanity.studio", self.project_id()))
    }
}

/// HTTP client for the Sanity query and mutate endpoints.
#[derive(Clone)]
pub struct SanityClient {
    http: Client,
    settings: SanitySettings,
}

impl SanityClient {
    /// Returns `None` when the project id or dataset is missing or malformed.
    pub fn from_settings(settings: SanitySettings) -> Result<Option<Self>, ContentError> {
        if !settings.is_configured() {
            return Ok(None);
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("folio-content/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Some(Self { http, settings }))
    }

    fn endpoint(&self, cdn: bool, action: &str) -> Result<Url, ContentError> {
        let host = if cdn { "apicdn.sanity.io" } else { "api.sanity.io" };
        let url = format!(
            "https://{}.{host}/v{}/data/{action}/{}",
            self.settings.project_id(),
            self.settings.api_version.trim(),
            self.settings.dataset(),
        );

        Ok(Url::parse(&url)?)
    }

    pub fn query_url(&self, query: &str, params: &Map<String, Value>) -> Result<Url, ContentError> {
        let mut url = self.endpoint(self.settings.use_cdn, "query")?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            pairs.append_pair("perspective", "published");
            for (name, value) in params {
                pairs.append_pair(&format!("${name}"), &value.to_string());
            }
        }

        Ok(url)
    }

    pub fn mutate_url(&self) -> Result<Url, ContentError> {
        let mut url = self.endpoint(false, "mutate")?;
        url.query_pairs_mut()
            .append_pair("returnDocuments", "true")
            .append_pair("autoGenerateArrayKeys", "true");

        Ok(url)
    }

    async fn read_body(response: Response) -> Result<Value, ContentError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }

    async fn mutate(&self, mutation: Value) -> Result<Value, ContentError> {
        let token = self
            .settings
            .write_token()
            .ok_or(ContentError::WriteNotConfigured)?;

        let response = self
            .http
            .post(self.mutate_url()?)
            .bearer_auth(token)
            .json(&json!({ "mutations": [mutation] }))
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        tracing::debug!(
            transaction_id = body["transactionId"].as_str().unwrap_or_default(),
            "sanity mutation committed"
        );

        Ok(first_document(body))
    }
}

/// Picks the changed document out of a mutate response.
fn first_document(mut body: Value) -> Value {
    let result = body
        .get_mut("results")
        .and_then(Value::as_array_mut)
        .and_then(|results| results.first_mut())
        .map(Value::take);

    match result {
        Some(mut result) => match result.get_mut("document").map(Value::take) {
            Some(document) if !document.is_null() => document,
            _ => result,
        },
        None => body
            .get_mut("documents")
            .and_then(Value::as_array_mut)
            .and_then(|documents| documents.first_mut())
            .map(Value::take)
            .unwrap_or(Value::Null),
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn fetch(&self, query: &str, params: Map<String, Value>) -> Result<Value, ContentError> {
        let mut request = self.http.get(self.query_url(query, &params)?);
        if let Some(token) = self.settings.read_token() {
            request = request.bearer_auth(token);
        }

        let mut body = Self::read_body(request.send().await?).await?;

        Ok(body
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    async fn create(&self, document: Value) -> Result<Value, ContentError> {
        self.mutate(json!({ "create": document })).await
    }

    async fn patch(&self, id: &str, set: Map<String, Value>) -> Result<Value, ContentError> {
        self.mutate(json!({ "patch": { "id": id, "set": set } }))
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ContentError> {
        self.mutate(json!({ "delete": { "id": id } })).await?;
        Ok(())
    }

    fn can_write(&self) -> bool {
        self.settings.write_token().is_some()
    }
}
