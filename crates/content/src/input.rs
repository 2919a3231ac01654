use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationError};

use crate::types::{AdminQuickLink, QuickLinkCategory};

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug pattern"));

fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    let valid = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("iso_date").with_message("Invalid ISO date string.".into()))
    }
}

fn validate_labels(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|value| value.is_empty()) {
        return Err(ValidationError::new("empty_label"));
    }

    Ok(())
}

fn validate_href(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }

    Ok(())
}

fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_owned();
    }
}

fn trim_opt(value: &mut Option<String>) {
    if let Some(value) = value {
        trim(value);
    }
}

fn trim_all(values: &mut [String]) {
    values.iter_mut().for_each(trim);
}

fn trim_all_opt(values: &mut Option<Vec<String>>) {
    if let Some(values) = values {
        trim_all(values);
    }
}

fn slug_value(slug: &str) -> Value {
    json!({ "_type": "slug", "current": slug })
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    #[validate(length(min = 8, max = 120))]
    pub title: String,
    #[validate(length(min = 3, max = 96), regex(path = *SLUG_PATTERN))]
    pub slug: String,
    #[validate(length(min = 40, max = 220))]
    pub excerpt: String,
    #[serde(default)]
    #[validate(custom(function = "validate_labels"))]
    pub tags: Vec<String>,
    #[validate(url)]
    pub website_url: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    #[validate(custom(function = "validate_iso_date"))]
    pub published_at: String,
    #[serde(default)]
    pub body: Vec<Map<String, Value>>,
    pub cover_image: Option<Map<String, Value>>,
}

impl PostInput {
    pub fn normalize(mut self) -> Self {
        trim(&mut self.title);
        trim(&mut self.slug);
        trim(&mut self.excerpt);
        trim_all(&mut self.tags);
        trim(&mut self.published_at);
        self
    }

    pub fn into_document(self) -> Value {
        let mut doc = json!({
            "_type": "post",
            "title": self.title,
            "slug": slug_value(&self.slug),
            "excerpt": self.excerpt,
            "tags": self.tags,
            "publishedAt": self.published_at,
            "body": self.body,
        });

        if let Some(fields) = doc.as_object_mut() {
            if let Some(url) = self.website_url {
                fields.insert("websiteUrl".into(), url.into());
            }
            if let Some(url) = self.github_url {
                fields.insert("githubUrl".into(), url.into());
            }
            if let Some(image) = self.cover_image {
                fields.insert("coverImage".into(), Value::Object(image));
            }
        }

        doc
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "post_update_not_empty"))]
pub struct PostUpdate {
    #[validate(length(min = 8, max = 120))]
    pub title: Option<String>,
    #[validate(length(min = 3, max = 96), regex(path = *SLUG_PATTERN))]
    pub slug: Option<String>,
    #[validate(length(min = 40, max = 220))]
    pub excerpt: Option<String>,
    #[validate(custom(function = "validate_labels"))]
    pub tags: Option<Vec<String>>,
    #[validate(url)]
    pub website_url: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    #[validate(custom(function = "validate_iso_date"))]
    pub published_at: Option<String>,
    pub body: Option<Vec<Map<String, Value>>>,
    pub cover_image: Option<Map<String, Value>>,
}

fn post_update_not_empty(update: &PostUpdate) -> Result<(), ValidationError> {
    if update.clone().into_set().is_empty() {
        return Err(ValidationError::new("empty_update")
            .with_message("At least one field is required for update.".into()));
    }

    Ok(())
}

impl PostUpdate {
    pub fn normalize(mut self) -> Self {
        trim_opt(&mut self.title);
        trim_opt(&mut self.slug);
        trim_opt(&mut self.excerpt);
        trim_all_opt(&mut self.tags);
        trim_opt(&mut self.published_at);
        self
    }

    /// Fields to `set` on the stored document. Absent fields are left untouched.
    pub fn into_set(self) -> Map<String, Value> {
        let mut set = Map::new();

        if let Some(title) = self.title {
            set.insert("title".into(), title.into());
        }
        if let Some(slug) = self.slug {
            set.insert("slug".into(), slug_value(&slug));
        }
        if let Some(excerpt) = self.excerpt {
            set.insert("excerpt".into(), excerpt.into());
        }
        if let Some(tags) = self.tags {
            set.insert("tags".into(), tags.into());
        }
        if let Some(published_at) = self.published_at {
            set.insert("publishedAt".into(), published_at.into());
        }
        if let Some(body) = self.body {
            set.insert("body".into(), body.into_iter().map(Value::Object).collect());
        }
        if let Some(image) = self.cover_image {
            set.insert("coverImage".into(), Value::Object(image));
        }
        if let Some(url) = self.website_url {
            set.insert("websiteUrl".into(), url.into());
        }
        if let Some(url) = self.github_url {
            set.insert("githubUrl".into(), url.into());
        }

        set
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[validate(length(min = 6, max = 100))]
    pub title: String,
    #[validate(length(min = 3, max = 96), regex(path = *SLUG_PATTERN))]
    pub slug: String,
    #[validate(length(min = 30, max = 240))]
    pub summary: String,
    #[validate(length(min = 50))]
    pub problem: String,
    #[validate(length(max = 400))]
    pub impact: Option<String>,
    #[validate(length(min = 2), custom(function = "validate_labels"))]
    pub tech_stack: Vec<String>,
    #[validate(url)]
    pub demo_url: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[validate(custom(function = "validate_iso_date"))]
    pub published_at: String,
    pub cover_image: Option<Map<String, Value>>,
}

impl ProjectInput {
    pub fn normalize(mut self) -> Self {
        trim(&mut self.title);
        trim(&mut self.slug);
        trim(&mut self.summary);
        trim(&mut self.problem);
        trim_opt(&mut self.impact);
        trim_all(&mut self.tech_stack);
        trim(&mut self.published_at);
        self
    }

    pub fn into_document(self) -> Value {
        let mut doc = json!({
            "_type": "project",
            "title": self.title,
            "slug": slug_value(&self.slug),
            "summary": self.summary,
            "problem": self.problem,
            "techStack": self.tech_stack,
            "featured": self.featured,
            "publishedAt": self.published_at,
        });

        if let Some(fields) = doc.as_object_mut() {
            if let Some(impact) = self.impact.filter(|impact| !impact.is_empty()) {
                fields.insert("impact".into(), impact.into());
            }
            if let Some(url) = self.demo_url {
                fields.insert("demoUrl".into(), url.into());
            }
            if let Some(url) = self.github_url {
                fields.insert("githubUrl".into(), url.into());
            }
            if let Some(image) = self.cover_image {
                fields.insert("coverImage".into(), Value::Object(image));
            }
        }

        doc
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "project_update_not_empty"))]
pub struct ProjectUpdate {
    #[validate(length(min = 6, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 3, max = 96), regex(path = *SLUG_PATTERN))]
    pub slug: Option<String>,
    #[validate(length(min = 30, max = 240))]
    pub summary: Option<String>,
    #[validate(length(min = 50))]
    pub problem: Option<String>,
    #[validate(length(max = 400))]
    pub impact: Option<String>,
    #[validate(length(min = 2), custom(function = "validate_labels"))]
    pub tech_stack: Option<Vec<String>>,
    #[validate(url)]
    pub demo_url: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    pub featured: Option<bool>,
    #[validate(custom(function = "validate_iso_date"))]
    pub published_at: Option<String>,
    pub cover_image: Option<Map<String, Value>>,
}

fn project_update_not_empty(update: &ProjectUpdate) -> Result<(), ValidationError> {
    if update.clone().into_set().is_empty() {
        return Err(ValidationError::new("empty_update")
            .with_message("At least one field is required for update.".into()));
    }

    Ok(())
}

impl ProjectUpdate {
    pub fn normalize(mut self) -> Self {
        trim_opt(&mut self.title);
        trim_opt(&mut self.slug);
        trim_opt(&mut self.summary);
        trim_opt(&mut self.problem);
        trim_opt(&mut self.impact);
        trim_all_opt(&mut self.tech_stack);
        trim_opt(&mut self.published_at);
        self
    }

    pub fn into_set(self) -> Map<String, Value> {
        let mut set = Map::new();

        if let Some(title) = self.title {
            set.insert("title".into(), title.into());
        }
        if let Some(slug) = self.slug {
            set.insert("slug".into(), slug_value(&slug));
        }
        if let Some(summary) = self.summary {
            set.insert("summary".into(), summary.into());
        }
        if let Some(problem) = self.problem {
            set.insert("problem".into(), problem.into());
        }
        if let Some(tech_stack) = self.tech_stack {
            set.insert("techStack".into(), tech_stack.into());
        }
        if let Some(featured) = self.featured {
            set.insert("featured".into(), featured.into());
        }
        if let Some(published_at) = self.published_at {
            set.insert("publishedAt".into(), published_at.into());
        }
        if let Some(impact) = self.impact {
            set.insert("impact".into(), impact.into());
        }
        if let Some(url) = self.demo_url {
            set.insert("demoUrl".into(), url.into());
        }
        if let Some(url) = self.github_url {
            set.insert("githubUrl".into(), url.into());
        }
        if let Some(image) = self.cover_image {
            set.insert("coverImage".into(), Value::Object(image));
        }

        set
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuickLinkInput {
    #[validate(length(min = 3, max = 80))]
    pub title: String,
    #[validate(length(min = 10, max = 220))]
    pub description: String,
    #[validate(custom(function = "validate_href"))]
    pub href: String,
    #[serde(default = "default_true")]
    pub is_external: bool,
    pub category: Option<QuickLinkCategory>,
    #[validate(range(max = 999))]
    pub order: Option<u32>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl From<QuickLinkInput> for AdminQuickLink {
    fn from(input: QuickLinkInput) -> Self {
        Self {
            key: None,
            title: input.title,
            description: input.description,
            href: input.href,
            is_external: Some(input.is_external),
            category: input.category,
            order: input.order,
            enabled: Some(input.enabled),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuickLinksUpdate {
    #[validate(length(min = 1), nested)]
    pub quick_links: Vec<QuickLinkInput>,
}

impl QuickLinksUpdate {
    pub fn normalize(mut self) -> Self {
        for link in &mut self.quick_links {
            trim(&mut link.title);
            trim(&mut link.description);
            trim(&mut link.href);
        }
        self
    }

    pub fn into_links(self) -> Vec<AdminQuickLink> {
        self.quick_links.into_iter().map(Into::into).collect()
    }
}
