use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_content::ContentError;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

/// Failures of the JSON API, rendered as `{ok: false, error, details?}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid payload.")]
    InvalidPayload(#[from] ValidationErrors),

    #[error("Invalid payload.")]
    Malformed(String),

    /// Payload errors on the collection PATCH, where the id travels in the body.
    #[error("Invalid update payload.")]
    InvalidUpdate(Option<Value>),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Sanity write configuration is missing.")]
    WriteUnavailable,

    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: ContentError,
    },
}

impl ApiError {
    /// Maps a content write failure, keeping the 503 for a read-only store.
    pub fn store(message: impl Into<String>, source: ContentError) -> Self {
        match source {
            ContentError::WriteNotConfigured => ApiError::WriteUnavailable,
            source => ApiError::Store {
                message: message.into(),
                source,
            },
        }
    }

    /// Rewords payload errors for the collection PATCH, keeping their details.
    pub fn for_update(self) -> Self {
        match self {
            ApiError::InvalidPayload(_) | ApiError::Malformed(_) => {
                ApiError::InvalidUpdate(self.details())
            }
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidPayload(_)
            | ApiError::Malformed(_)
            | ApiError::InvalidUpdate(_)
            | ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::WriteUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            ApiError::InvalidPayload(errors) => serde_json::to_value(errors).ok(),
            ApiError::Malformed(reason) => Some(Value::String(reason.clone())),
            ApiError::InvalidUpdate(details) => details.clone(),
            _ => None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store { message, source } = &self {
            tracing::error!(error = %source, "{message}");
        }

        let mut body = json!({ "ok": false, "error": self.to_string() });
        if let Some(details) = self.details() {
            body["details"] = details;
        }

        (self.status(), Json(body)).into_response()
    }
}
