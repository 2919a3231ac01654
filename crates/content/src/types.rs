use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SanityImageAsset {
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SanityImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<SanityImageAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Portable text blocks, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<Value>>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<SanityImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub problem: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<SanityImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuickLinkCategory {
    Content,
    Comments,
    Contacts,
    Analytics,
    Operations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminQuickLink {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub title: String,
    pub description: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_external: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<QuickLinkCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl AdminQuickLink {
    /// Links without an explicit `enabled` flag are shown.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// Sorts by `order`, links without one go last. Stable for equal orders.
pub(crate) fn sort_quick_links(mut links: Vec<AdminQuickLink>) -> Vec<AdminQuickLink> {
    links.sort_by_key(|link| link.order.unwrap_or(u32::MAX));
    links
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugItem {
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.min(MAX_PAGE_LIMIT),
        }
    }

    fn end(&self) -> u32 {
        self.offset.saturating_add(self.limit.min(MAX_PAGE_LIMIT))
    }

    /// GROQ slice suffix, e.g. `[0...20]`.
    pub fn slice(&self) -> String {
        format!("[{}...{}]", self.offset, self.end())
    }

    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = (self.offset as usize).min(items.len());
        let end = (self.end() as usize).min(items.len());
        items[start..end].to_vec()
    }
}
