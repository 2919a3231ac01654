#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use folio::{
    AppState,
    auth::SESSION_COOKIE_NAME,
    config::{AppConfig, AuthConfig, Config, ObservabilityConfig, RunMode, ServerConfig},
};
use folio_content::{Content, ContentError, ContentStore, SanitySettings};
use http_body_util::BodyExt;
use serde_json::{Map, Value};

pub const USERNAME: &str = "owner";
pub const PASSWORD: &str = "correct horse battery staple";
pub const SECRET: &str = "test_secret_key_minimum_32_characters_long";

/// In-memory store counting every call it receives.
#[derive(Default)]
pub struct CountingStore {
    pub writable: bool,
    pub fetches: AtomicUsize,
    pub creates: AtomicUsize,
    pub patches: AtomicUsize,
    pub deletes: AtomicUsize,
    pub fail_writes: bool,
}

impl CountingStore {
    pub fn writable() -> Self {
        Self {
            writable: true,
            ..Default::default()
        }
    }

    pub fn mutations(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
            + self.patches.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    fn write_result(&self) -> Result<(), ContentError> {
        if self.fail_writes {
            return Err(ContentError::Api {
                status: 500,
                message: "mutation failed".to_owned(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for CountingStore {
    async fn fetch(&self, _query: &str, _params: Map<String, Value>) -> Result<Value, ContentError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    }

    async fn create(&self, document: Value) -> Result<Value, ContentError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;

        let mut document = document;
        document["_id"] = Value::from("created-1");
        Ok(document)
    }

    async fn patch(&self, id: &str, set: Map<String, Value>) -> Result<Value, ContentError> {
        self.patches.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;

        let mut document = set;
        document.insert("_id".to_owned(), Value::from(id));
        Ok(Value::Object(document))
    }

    async fn delete(&self, _id: &str) -> Result<(), ContentError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.write_result()
    }

    fn can_write(&self) -> bool {
        self.writable
    }
}

pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            environment: RunMode::Development,
            site_url: "https://example.com".to_owned(),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        auth: AuthConfig {
            username: USERNAME.to_owned(),
            password: PASSWORD.to_owned(),
            session_secret: SECRET.to_owned(),
        },
        sanity: SanitySettings::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Option<Arc<CountingStore>>,
}

impl TestApp {
    /// App serving bundled fallback content only.
    pub fn without_store() -> Self {
        Self::build(test_config(), None)
    }

    pub fn with_store(store: CountingStore) -> Self {
        Self::build(test_config(), Some(Arc::new(store)))
    }

    pub fn build(config: Config, store: Option<Arc<CountingStore>>) -> Self {
        let content = Content::new(
            store
                .clone()
                .map(|store| store as Arc<dyn ContentStore>),
        );
        let state = AppState::new(config, content);

        Self {
            router: folio::router(state.clone()),
            state,
            store,
        }
    }

    pub fn store(&self) -> &CountingStore {
        self.store.as_deref().expect("test app built without a store")
    }

    /// A `Cookie` header value holding a valid session.
    pub fn session_cookie(&self) -> String {
        let token = self.state.session.issue(USERNAME).unwrap();
        format!("{SESSION_COOKIE_NAME}={token}")
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn set_cookie_headers(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_owned)
        .collect()
}
