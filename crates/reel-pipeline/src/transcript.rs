//! Transcript document loading.
//!
//! The speech-to-text engine is an external collaborator; this module only
//! reads the JSON document it produces.

use std::path::Path;

use tracing::{debug, warn};

use reel_models::TranscriptDocument;

use crate::error::{PipelineError, PipelineResult};

/// Load and sanity-check a transcript document.
pub async fn load_transcript(path: impl AsRef<Path>) -> PipelineResult<TranscriptDocument> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        PipelineError::transcript(format!("cannot read {}: {}", path.display(), e))
    })?;

    let doc: TranscriptDocument = serde_json::from_slice(&bytes)?;

    for (i, segment) in doc.segments.iter().enumerate() {
        if segment.start < 0.0 || segment.end < segment.start {
            return Err(PipelineError::transcript(format!(
                "segment {} has invalid range [{:.3}, {:.3}]",
                i, segment.start, segment.end
            )));
        }
    }

    if doc.is_empty() {
        warn!(path = %path.display(), "Transcript contains no speech");
    }

    debug!(
        path = %path.display(),
        segments = doc.segments.len(),
        "Loaded transcript"
    );

    Ok(doc)
}
