use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::routes::AppState;

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /ready - Reports which content source is serving reads
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let content = if state.content.is_configured() {
        "sanity"
    } else {
        "fallback"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "content": content,
            "writable": state.content.can_write(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }
}
