use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use folio_content::{AdminQuickLink, QuickLinksUpdate};
use serde_json::{Value, json};
use validator::Validate;

use super::{Envelope, decode_body, ensure_writable};
use crate::{auth::AdminSession, error::ApiError, routes::AppState};

/// GET /api/admin/quick-links, disabled links included.
pub async fn list(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Json<Envelope<Vec<AdminQuickLink>>> {
    Envelope::ok(state.content.quick_links_for_admin().await)
}

/// PUT /api/admin/quick-links
#[tracing::instrument(skip_all, fields(admin = %session.0.sub))]
pub async fn replace(
    session: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    ensure_writable(&state)?;

    let update = decode_body::<QuickLinksUpdate>(payload)?.normalize();
    update.validate()?;

    let links = update.into_links();
    let count = links.len();
    state
        .content
        .replace_quick_links(links)
        .await
        .map_err(|e| ApiError::store("Failed to update admin quick links.", e))?;

    tracing::info!(count, "admin quick links replaced");
    Ok(Envelope::ok(json!({ "updated": true })))
}
