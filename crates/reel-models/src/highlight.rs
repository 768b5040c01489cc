//! Highlight candidate and scored event models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::deserialize_seconds;

/// Lowest valid highlight score.
pub const SCORE_MIN: i64 = 1;
/// Highest valid highlight score.
pub const SCORE_MAX: i64 = 10;

/// Validation failure for a highlight candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HighlightValidationError {
    #[error("start time {0:.3}s is negative")]
    NegativeStart(f64),

    #[error("empty or inverted range: start {start:.3}s must be before end {end:.3}s")]
    EmptyRange { start: f64, end: f64 },

    #[error("score {score} outside valid range [{SCORE_MIN}, {SCORE_MAX}]")]
    ScoreOutOfRange { score: i64 },
}

/// A highlight candidate derived from the transcript by the external
/// language-model analyzer.
///
/// This is the boundary contract with the analyzer: whatever wire format the
/// model answers in, it is normalized to this shape before fusion. Treated
/// as read-only input by the fusion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextHighlight {
    /// Start of the spoken highlight, seconds.
    #[serde(deserialize_with = "deserialize_seconds")]
    pub start: f64,

    /// End of the spoken highlight, seconds.
    #[serde(deserialize_with = "deserialize_seconds")]
    pub end: f64,

    /// What happens in this moment, per the analyzer.
    pub description: String,

    /// Analyzer confidence, integer in [1, 10].
    pub score: i64,
}

impl TextHighlight {
    /// Check the record's invariants.
    ///
    /// Invalid records are rejected at the fusion boundary, never silently
    /// coerced.
    pub fn validate(&self) -> Result<(), HighlightValidationError> {
        if self.start < 0.0 {
            return Err(HighlightValidationError::NegativeStart(self.start));
        }
        if self.start >= self.end {
            return Err(HighlightValidationError::EmptyRange {
                start: self.start,
                end: self.end,
            });
        }
        if !(SCORE_MIN..=SCORE_MAX).contains(&self.score) {
            return Err(HighlightValidationError::ScoreOutOfRange { score: self.score });
        }
        Ok(())
    }

    /// Duration of the candidate in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A highlight candidate after fusion with the audio signal.
///
/// Exactly one is produced per input [`TextHighlight`]; score fields are set
/// once during fusion and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredEvent {
    /// Start of the highlight, seconds.
    pub start: f64,

    /// End of the highlight, seconds.
    pub end: f64,

    /// Description carried over from the text candidate.
    pub description: String,

    /// The analyzer's original score.
    pub base_score: f64,

    /// Additional confidence from matching audio peaks; never negative.
    pub audio_boost: f64,

    /// `base_score + audio_boost`, clamped to the valid score range.
    pub final_score: f64,
}

impl ScoredEvent {
    /// Duration of the event in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Whether the audio signal corroborated this event.
    pub fn audio_corroborated(&self) -> bool {
        self.audio_boost > 0.0
    }
}
