//! Analyzer error types.

use thiserror::Error;

use reel_models::HighlightValidationError;

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("API key not configured (set HIGHLIGHT_API_KEY)")]
    MissingApiKey,

    #[error("Analysis request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Failed to parse highlights from model response: {0}")]
    ParseFailed(String),

    #[error("Model returned invalid highlight at index {index}: {source}")]
    InvalidHighlight {
        index: usize,
        #[source]
        source: HighlightValidationError,
    },
}

impl AnalyzerError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn parse_failed(msg: impl Into<String>) -> Self {
        Self::ParseFailed(msg.into())
    }
}
