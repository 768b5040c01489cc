//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Media error: {0}")]
    Media(#[from] reel_media::MediaError),

    #[error("Fusion error: {0}")]
    Fusion(#[from] reel_engine::FusionError),

    #[error("Analyzer error: {0}")]
    Analyzer(#[from] reel_analyzer::AnalyzerError),

    #[error("Invalid transcript document: {0}")]
    Transcript(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn transcript(msg: impl Into<String>) -> Self {
        Self::Transcript(msg.into())
    }
}
