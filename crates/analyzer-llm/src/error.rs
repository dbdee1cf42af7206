//! Error types for LLM calls

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LLMError>;

#[derive(Error, Debug)]
pub enum LLMError {
    /// The server rejected the API key (HTTP 401)
    #[error("authentication failed, check OPENAI_API_KEY")]
    Unauthorized,

    /// HTTP 429
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The model is not on the configured allow-list
    #[error("model '{0}' is not supported by this provider")]
    UnsupportedModel(String),

    /// The body parsed but did not carry a usable reply
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LLMError {
    /// Classify a non-success HTTP response
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized,
            429 => Self::RateLimited(body),
            _ => Self::Status { status, body },
        }
    }
}
