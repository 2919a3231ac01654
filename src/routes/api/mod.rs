//! JSON API under `/api`
//!
//! Reads are public and cacheable. Every mutation, and the admin quick-link
//! listing, requires an [`AdminSession`](crate::auth::AdminSession).

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{error::ApiError, routes::AppState};

mod posts;
mod projects;
mod quick_links;

pub const PUBLIC_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=120";

/// Success body: `{ok: true, data}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    ok: bool,
    data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { ok: true, data })
    }
}

/// `?id=` on collection deletes.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(posts::list)
                .post(posts::create)
                .patch(posts::update)
                .delete(posts::delete),
        )
        .route(
            "/posts/{id}",
            patch(posts::update_by_id).delete(posts::delete_by_id),
        )
        .route(
            "/projects",
            get(projects::list)
                .post(projects::create)
                .patch(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/projects/{id}",
            patch(projects::update_by_id).delete(projects::delete_by_id),
        )
        .route(
            "/admin/quick-links",
            get(quick_links::list).put(quick_links::replace),
        )
}

/// Adds the shared-cache policy used by public listings.
fn cacheable(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(PUBLIC_CACHE_CONTROL),
    );
    response
}

fn ensure_writable(state: &AppState) -> Result<(), ApiError> {
    if state.content.can_write() {
        Ok(())
    } else {
        Err(ApiError::WriteUnavailable)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn decode_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = payload?;
    decode(value)
}

/// Pulls a non-empty `id` out of a JSON object body.
fn take_id(body: &mut Value) -> Option<String> {
    let id = body.as_object_mut()?.remove("id")?;
    id.as_str()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
}

fn require_id(id: Option<String>, entity: &str) -> Result<String, ApiError> {
    id.map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Unprocessable(format!("Missing {entity} ID.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_take_id_removes_field() {
        let mut body = json!({ "id": " post-1 ", "title": "Updated title" });

        assert_eq!(take_id(&mut body).as_deref(), Some("post-1"));
        assert_eq!(body, json!({ "title": "Updated title" }));
    }

    #[test]
    fn test_take_id_rejects_blank_or_missing() {
        assert_eq!(take_id(&mut json!({ "id": "  " })), None);
        assert_eq!(take_id(&mut json!({ "id": 7 })), None);
        assert_eq!(take_id(&mut json!({ "title": "x" })), None);
        assert_eq!(take_id(&mut json!(["id"])), None);
    }

    #[test]
    fn test_require_id_message() {
        let error = require_id(None, "post").unwrap_err();
        assert_eq!(error.to_string(), "Missing post ID.");
        assert_eq!(require_id(Some("p1".to_owned()), "post").unwrap(), "p1");
    }
}
