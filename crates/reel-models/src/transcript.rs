//! Transcript documents from the external speech-to-text engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_clock;

/// One spoken segment of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Segment start, seconds.
    pub start: f64,

    /// Segment end, seconds.
    pub end: f64,

    /// Transcribed text.
    pub text: String,
}

/// The full transcript of a video, as produced by the external
/// speech-to-text engine.
///
/// The engine itself is out of scope; this is the document shape the
/// pipeline reads at its boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptDocument {
    /// Ordered spoken segments covering the whole video.
    pub segments: Vec<TranscriptSegment>,

    /// Detected language code, when the engine reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl TranscriptDocument {
    /// Whether the transcript contains any speech at all.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.trim().is_empty())
    }

    /// The complete spoken text, segments joined by spaces.
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The transcript rendered as `[MM:SS] text` lines.
    ///
    /// This is what the analyzer prompt embeds so the model can quote
    /// timestamps instead of inventing them.
    pub fn timestamped_text(&self) -> String {
        self.segments
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .map(|s| format!("[{}] {}", format_clock(s.start), s.text.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
