//! Audio peak detection.
//!
//! This module handles:
//! 1. Extracting audio from video files to 16kHz mono f32 samples
//! 2. Computing a short-time RMS envelope over overlapping frames
//! 3. Normalizing against the loudest frame so the threshold is
//!    video-relative
//! 4. Collapsing above-threshold runs into single peaks
//!
//! The envelope and peak-picking stages are pure and unit-tested on
//! synthetic buffers; only the extraction step touches FFmpeg.

mod config;
mod detector;
mod envelope;

pub use config::PeakDetectionConfig;
pub use detector::detect_peaks;

// Pure stages, usable directly by callers that already hold decoded samples.
pub use detector::pick_peaks;
pub use envelope::{normalize_envelope, rms_envelope};
