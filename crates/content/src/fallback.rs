use std::sync::LazyLock;

use serde::Deserialize;

use crate::types::{AdminQuickLink, BlogPost, Project};

/// Content served while the store is unconfigured or unreachable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Fallback {
    pub posts: Vec<BlogPost>,
    pub projects: Vec<Project>,
    pub quick_links: Vec<AdminQuickLink>,
}

pub(crate) static FALLBACK: LazyLock<Fallback> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../fallback/content.json")).unwrap_or_else(|e| {
        tracing::error!(error = %e, "bundled fallback content is malformed");
        Fallback::default()
    })
});
