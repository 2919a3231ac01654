use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::ContentError;

/// Read/write access to the headless content store.
///
/// `fetch` returns `Value::Null` when a query matches nothing.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch(&self, query: &str, params: Map<String, Value>) -> Result<Value, ContentError>;

    async fn create(&self, document: Value) -> Result<Value, ContentError>;

    /// Sets the given top-level fields on an existing document.
    async fn patch(&self, id: &str, set: Map<String, Value>) -> Result<Value, ContentError>;

    async fn delete(&self, id: &str) -> Result<(), ContentError>;

    /// Whether mutations can be issued (a write token is available).
    fn can_write(&self) -> bool;
}
