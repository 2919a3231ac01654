use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content store write configuration is missing")]
    WriteNotConfigured,

    #[error("content store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("content store responded with {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid content store url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected content store payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("document not found: {0}")]
    NotFound(String),
}
