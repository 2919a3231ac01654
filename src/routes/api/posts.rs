use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_content::{Pagination, PostInput, PostUpdate};
use serde_json::{Value, json};
use validator::Validate;

use super::{
    Envelope, IdQuery, cacheable, decode, decode_body, ensure_writable, require_id, take_id,
};
use crate::{auth::AdminSession, error::ApiError, routes::AppState};

/// GET /api/posts?offset&limit
pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Response {
    let page = page
        .map(|Query(page)| Pagination::new(page.offset, page.limit))
        .unwrap_or_default();

    cacheable(Envelope::ok(state.content.posts(page).await))
}

#[tracing::instrument(skip_all, fields(admin = %session.0.sub))]
pub async fn create(
    session: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    ensure_writable(&state)?;

    let input = decode_body::<PostInput>(payload)?.normalize();
    input.validate()?;

    let slug = input.slug.clone();
    let created = state
        .content
        .create_post(input)
        .await
        .map_err(|e| ApiError::store("Failed to create post.", e))?;

    tracing::info!(slug = %slug, "post created");
    Ok((StatusCode::CREATED, Envelope::ok(created)).into_response())
}

/// PATCH /api/posts with the document id inside the body.
#[tracing::instrument(skip_all, fields(admin = %session.0.sub))]
pub async fn update(
    session: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    let Json(mut body) = payload?;
    let id = require_id(take_id(&mut body), "post")?;
    let update = decode::<PostUpdate>(body)
        .map_err(ApiError::for_update)?
        .normalize();
    update
        .validate()
        .map_err(|e| ApiError::from(e).for_update())?;

    state
        .content
        .update_post(&id, update)
        .await
        .map_err(|e| ApiError::store("Failed to update post.", e))?;

    tracing::info!(id = %id, "post updated");
    Ok(Envelope::ok(json!({ "updated": true })))
}

/// DELETE /api/posts?id=
#[tracing::instrument(skip_all, fields(admin = %session.0.sub))]
pub async fn delete(
    session: AdminSession,
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    let id = require_id(query.ok().and_then(|Query(query)| query.id), "post")?;
    state
        .content
        .delete_post(&id)
        .await
        .map_err(|e| ApiError::store("Failed to delete post.", e))?;

    tracing::info!(id = %id, "post deleted");
    Ok(Envelope::ok(json!({ "deleted": true })))
}

/// PATCH /api/posts/{id}, answering with the patched document.
#[tracing::instrument(skip_all, fields(admin = %session.0.sub, id = %id))]
pub async fn update_by_id(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    let update = decode_body::<PostUpdate>(payload)?.normalize();
    update.validate()?;

    let updated = state
        .content
        .update_post(&id, update)
        .await
        .map_err(|e| ApiError::store("Failed to update post.", e))?;

    Ok(Envelope::ok(updated))
}

/// DELETE /api/posts/{id}
#[tracing::instrument(skip_all, fields(admin = %session.0.sub, id = %id))]
pub async fn delete_by_id(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    state
        .content
        .delete_post(&id)
        .await
        .map_err(|e| ApiError::store("Failed to delete post.", e))?;

    Ok(Envelope::ok(json!({ "id": id, "deleted": true })))
}
