use std::sync::Arc;

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};

use crate::{
    ContentError, ContentStore, PostInput, PostUpdate, ProjectInput, ProjectUpdate,
    SanityClient, SanitySettings,
    fallback::FALLBACK,
    queries,
    types::{AdminQuickLink, BlogPost, Pagination, Project, SlugItem, sort_quick_links},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdminSettings {
    #[serde(default)]
    quick_links: Option<Vec<AdminQuickLink>>,
}

#[derive(Debug, Deserialize)]
struct DocumentId {
    #[serde(rename = "_id")]
    id: String,
}

/// Typed access to site content with fallback reads.
///
/// Reads never fail: when the store is missing, errors, or returns nothing, the
/// bundled fallback content is served instead. Writes require a store that can write.
#[derive(Clone, Default)]
pub struct Content {
    store: Option<Arc<dyn ContentStore>>,
}

impl Content {
    pub fn new(store: Option<Arc<dyn ContentStore>>) -> Self {
        Self { store }
    }

    pub fn from_settings(settings: SanitySettings) -> Result<Self, ContentError> {
        let store = SanityClient::from_settings(settings)?
            .map(|client| Arc::new(client) as Arc<dyn ContentStore>);

        Ok(Self { store })
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.store.as_ref().is_some_and(|store| store.can_write())
    }

    /// The store, if mutations can be issued against it.
    pub fn writer(&self) -> Result<&dyn ContentStore, ContentError> {
        match &self.store {
            Some(store) if store.can_write() => Ok(store.as_ref()),
            _ => Err(ContentError::WriteNotConfigured),
        }
    }

    async fn fetch_with_fallback<T, F>(&self, query: &str, params: Map<String, Value>, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let Some(store) = &self.store else {
            return fallback();
        };

        match store.fetch(query, params).await {
            Ok(Value::Null) => fallback(),
            Ok(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "content store returned an unexpected shape, serving fallback");
                fallback()
            }),
            Err(e) => {
                tracing::warn!(error = %e, "content store fetch failed, serving fallback");
                fallback()
            }
        }
    }

    pub async fn posts(&self, page: Pagination) -> Vec<BlogPost> {
        let query = format!("{}{}", queries::POSTS, page.slice());
        self.fetch_with_fallback(&query, Map::new(), || page.apply(&FALLBACK.posts))
            .await
    }

    pub async fn post_slugs(&self) -> Vec<SlugItem> {
        self.fetch_with_fallback(queries::POST_SLUGS, Map::new(), || {
            FALLBACK
                .posts
                .iter()
                .map(|post| SlugItem {
                    slug: post.slug.clone(),
                })
                .collect()
        })
        .await
    }

    pub async fn projects(&self, page: Pagination) -> Vec<Project> {
        let query = format!("{}{}", queries::PROJECTS, page.slice());
        self.fetch_with_fallback(&query, Map::new(), || page.apply(&FALLBACK.projects))
            .await
    }

    pub async fn project_slugs(&self) -> Vec<SlugItem> {
        self.fetch_with_fallback(queries::PROJECT_SLUGS, Map::new(), || {
            FALLBACK
                .projects
                .iter()
                .map(|project| SlugItem {
                    slug: project.slug.clone(),
                })
                .collect()
        })
        .await
    }

    async fn stored_quick_links(&self) -> Option<Vec<AdminQuickLink>> {
        let settings: Option<AdminSettings> = self
            .fetch_with_fallback(queries::ADMIN_SETTINGS, Map::new(), || None)
            .await;

        settings
            .and_then(|settings| settings.quick_links)
            .filter(|links| !links.is_empty())
    }

    /// Every link, disabled ones included, in display order.
    pub async fn quick_links_for_admin(&self) -> Vec<AdminQuickLink> {
        let links = self
            .stored_quick_links()
            .await
            .unwrap_or_else(|| FALLBACK.quick_links.clone());

        sort_quick_links(links)
    }

    pub async fn create_post(&self, input: PostInput) -> Result<Value, ContentError> {
        self.writer()?.create(input.into_document()).await
    }

    pub async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Value, ContentError> {
        self.writer()?.patch(id, update.into_set()).await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), ContentError> {
        self.writer()?.delete(id).await
    }

    pub async fn create_project(&self, input: ProjectInput) -> Result<Value, ContentError> {
        self.writer()?.create(input.into_document()).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Value, ContentError> {
        self.writer()?.patch(id, update.into_set()).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ContentError> {
        self.writer()?.delete(id).await
    }

    /// Replaces the dashboard quick links, creating the settings document on first use.
    pub async fn replace_quick_links(&self, links: Vec<AdminQuickLink>) -> Result<(), ContentError> {
        let store = self.writer()?;
        let existing = store.fetch(queries::ADMIN_SETTINGS_ID, Map::new()).await?;
        let existing: Option<DocumentId> = serde_json::from_value(existing)?;

        let links = serde_json::to_value(links)?;
        match existing {
            Some(DocumentId { id }) => {
                let mut set = Map::new();
                set.insert("_type".to_owned(), "adminSettings".into());
                set.insert("quickLinks".to_owned(), links);
                store.patch(&id, set).await?;
            }
            None => {
                store
                    .create(json!({ "_type": "adminSettings", "quickLinks": links }))
                    .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Answers every query with the same value and records mutations.
    #[derive(Default)]
    struct StubStore {
        answer: Option<Value>,
        fail: bool,
        writable: bool,
        mutations: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ContentStore for StubStore {
        async fn fetch(&self, _query: &str, _params: Map<String, Value>) -> Result<Value, ContentError> {
            if self.fail {
                return Err(ContentError::Api {
                    status: 500,
                    message: "boom".to_owned(),
                });
            }
            Ok(self.answer.clone().unwrap_or(Value::Null))
        }

        async fn create(&self, document: Value) -> Result<Value, ContentError> {
            self.mutations.lock().unwrap().push("create".to_owned());
            Ok(document)
        }

        async fn patch(&self, id: &str, set: Map<String, Value>) -> Result<Value, ContentError> {
            self.mutations.lock().unwrap().push(format!("patch:{id}"));
            Ok(Value::Object(set))
        }

        async fn delete(&self, id: &str) -> Result<(), ContentError> {
            self.mutations.lock().unwrap().push(format!("delete:{id}"));
            Ok(())
        }

        fn can_write(&self) -> bool {
            self.writable
        }
    }

    fn content(store: StubStore) -> (Content, Arc<StubStore>) {
        let store = Arc::new(store);
        (Content::new(Some(store.clone() as Arc<dyn ContentStore>)), store)
    }

    #[tokio::test]
    async fn test_unconfigured_store_serves_paginated_fallback() {
        let content = Content::default();

        let posts = content.posts(Pagination::new(1, 1)).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "post-2");
        assert_eq!(content.project_slugs().await.len(), 3);
    }

    #[tokio::test]
    async fn test_failing_store_serves_fallback() {
        let (content, _) = content(StubStore {
            fail: true,
            ..Default::default()
        });

        assert_eq!(content.projects(Pagination::default()).await.len(), 3);
    }

    #[tokio::test]
    async fn test_store_results_win_over_fallback() {
        let (content, _) = content(StubStore {
            answer: Some(json!([{
                "_id": "p",
                "title": "Stored",
                "slug": "stored",
                "excerpt": "stored excerpt",
                "publishedAt": "2025-01-01"
            }])),
            ..Default::default()
        });

        let posts = content.posts(Pagination::default()).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Stored");
    }

    #[tokio::test]
    async fn test_admin_quick_links_keep_disabled_in_order() {
        let (content, _) = content(StubStore {
            answer: Some(json!({
                "quickLinks": [
                    { "title": "b", "description": "second link", "href": "/b", "order": 2 },
                    { "title": "hidden", "description": "disabled link", "href": "/h", "order": 1, "enabled": false },
                    { "title": "a", "description": "first link", "href": "/a", "order": 0 }
                ]
            })),
            ..Default::default()
        });

        let admin: Vec<_> = content
            .quick_links_for_admin()
            .await
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(admin, vec!["a", "hidden", "b"]);
    }

    #[tokio::test]
    async fn test_empty_stored_quick_links_fall_back() {
        let (content, _) = content(StubStore {
            answer: Some(json!({ "quickLinks": [] })),
            ..Default::default()
        });

        assert_eq!(content.quick_links_for_admin().await.len(), 4);
    }

    #[tokio::test]
    async fn test_writes_require_writable_store() {
        let (content, store) = content(StubStore::default());

        let result = content.delete_post("post-1").await;
        assert!(matches!(result, Err(ContentError::WriteNotConfigured)));
        assert!(store.mutations.lock().unwrap().is_empty());
        assert!(matches!(
            Content::default().delete_project("x").await,
            Err(ContentError::WriteNotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_replace_quick_links_patches_existing_settings() {
        let (content, store) = content(StubStore {
            answer: Some(json!({ "_id": "settings-1" })),
            writable: true,
            ..Default::default()
        });

        content.replace_quick_links(FALLBACK.quick_links.clone()).await.unwrap();
        assert_eq!(*store.mutations.lock().unwrap(), vec!["patch:settings-1"]);
    }

    #[tokio::test]
    async fn test_replace_quick_links_creates_missing_settings() {
        let (content, store) = content(StubStore {
            writable: true,
            ..Default::default()
        });

        content.replace_quick_links(FALLBACK.quick_links.clone()).await.unwrap();
        assert_eq!(*store.mutations.lock().unwrap(), vec!["create"]);
    }
}
