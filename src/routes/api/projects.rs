use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_content::{Pagination, ProjectInput, ProjectUpdate};
use serde_json::{Value, json};
use validator::Validate;

use super::{
    Envelope, IdQuery, cacheable, decode, decode_body, ensure_writable, require_id, take_id,
};
use crate::{auth::AdminSession, error::ApiError, routes::AppState};

pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Response {
    let page = page
        .map(|Query(page)| Pagination::new(page.offset, page.limit))
        .unwrap_or_default();

    cacheable(Envelope::ok(state.content.projects(page).await))
}

#[tracing::instrument(skip_all, fields(admin = %session.0.sub))]
pub async fn create(
    session: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    ensure_writable(&state)?;

    let input = decode_body::<ProjectInput>(payload)?.normalize();
    input.validate()?;

    let slug = input.slug.clone();
    let created = state
        .content
        .create_project(input)
        .await
        .map_err(|e| ApiError::store("Failed to create project.", e))?;

    tracing::info!(slug = %slug, "project created");
    Ok((StatusCode::CREATED, Envelope::ok(created)).into_response())
}

#[tracing::instrument(skip_all, fields(admin = %session.0.sub))]
pub async fn update(
    session: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    let Json(mut body) = payload?;
    let id = require_id(take_id(&mut body), "project")?;
    let update = decode::<ProjectUpdate>(body)
        .map_err(ApiError::for_update)?
        .normalize();
    update
        .validate()
        .map_err(|e| ApiError::from(e).for_update())?;

    state
        .content
        .update_project(&id, update)
        .await
        .map_err(|e| ApiError::store("Failed to update project.", e))?;

    tracing::info!(id = %id, "project updated");
    Ok(Envelope::ok(json!({ "updated": true })))
}

#[tracing::instrument(skip_all, fields(admin = %session.0.sub))]
pub async fn delete(
    session: AdminSession,
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    let id = require_id(query.ok().and_then(|Query(query)| query.id), "project")?;
    state
        .content
        .delete_project(&id)
        .await
        .map_err(|e| ApiError::store("Failed to delete project.", e))?;

    tracing::info!(id = %id, "project deleted");
    Ok(Envelope::ok(json!({ "deleted": true })))
}

#[tracing::instrument(skip_all, fields(admin = %session.0.sub, id = %id))]
pub async fn update_by_id(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    let update = decode_body::<ProjectUpdate>(payload)?.normalize();
    update.validate()?;

    let updated = state
        .content
        .update_project(&id, update)
        .await
        .map_err(|e| ApiError::store("Failed to update project.", e))?;

    Ok(Envelope::ok(updated))
}

#[tracing::instrument(skip_all, fields(admin = %session.0.sub, id = %id))]
pub async fn delete_by_id(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    state
        .content
        .delete_project(&id)
        .await
        .map_err(|e| ApiError::store("Failed to delete project.", e))?;

    Ok(Envelope::ok(json!({ "id": id, "deleted": true })))
}
