//! Error types for stock research operations

use thiserror::Error;

/// Stock research specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// No resolution strategy matched the input
    #[error("Stock '{0}' not found. Try the full company name or an exact ticker symbol")]
    NotFound(String),

    /// Fewer price points than a performance figure needs
    #[error("Insufficient data for {symbol}: {points} price point(s), need at least 2")]
    InsufficientData { symbol: String, points: usize },

    /// Price data missing for a resolved symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// A collaborator (market data, news, search, LLM) failed
    #[error("{provider} error: {message}")]
    Provider { provider: String, message: String },

    /// Malformed boundary input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResearchError {
    /// Shorthand for a collaborator failure
    pub fn provider(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    /// HTTP status an embedding web layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::InsufficientData { .. } | Self::DataUnavailable { .. } => 404,
            Self::Validation(_) => 400,
            _ => 500,
        }
    }
}

impl From<analyzer_llm::LLMError> for ResearchError {
    fn from(err: analyzer_llm::LLMError) -> Self {
        Self::provider("LLM", err)
    }
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;
