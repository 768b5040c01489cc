//! Shared data models for the SportsReel highlight pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Audio peaks and text-derived highlight candidates
//! - Scored events produced by signal fusion
//! - Final clip ranges consumed by the video extractor
//! - Transcript documents from the external speech-to-text engine
//! - Encoding configuration for FFmpeg

pub mod clip;
pub mod encoding;
pub mod highlight;
pub mod peak;
pub mod timestamp;
pub mod transcript;

// Re-export common types
pub use clip::{total_duration, ClipRange};
pub use encoding::EncodingConfig;
pub use highlight::{HighlightValidationError, ScoredEvent, TextHighlight};
pub use peak::AudioPeak;
pub use timestamp::{format_clock, format_seconds, parse_timestamp, TimestampError};
pub use transcript::{TranscriptDocument, TranscriptSegment};
