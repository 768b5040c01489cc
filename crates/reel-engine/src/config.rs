//! Configuration for fusion and segment assembly.
//!
//! These values are always passed in explicitly so the engine stays
//! deterministic and testable without environment setup.

use serde::{Deserialize, Serialize};

/// Configuration for fusing audio peaks with text highlight candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Extra seconds searched around a candidate's range when no peak falls
    /// strictly inside it.
    ///
    /// Speech timing and audio-energy timing are not perfectly synchronized:
    /// the crowd erupts a beat after the commentator's call, or slightly
    /// before it. Two seconds covers the drift seen in practice.
    pub match_tolerance_secs: f64,

    /// Multiplier from peak magnitude to score boost.
    ///
    /// `audio_boost = round(max_matching_magnitude * boost_scale)`, so the
    /// default of 2.0 means a full-scale peak is worth two score points.
    pub boost_scale: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            match_tolerance_secs: 2.0,
            boost_scale: 2.0,
        }
    }
}

impl FusionConfig {
    /// Builder-style setter for the match tolerance.
    pub fn with_tolerance(mut self, secs: f64) -> Self {
        self.match_tolerance_secs = secs.max(0.0);
        self
    }

    /// Builder-style setter for the boost scale.
    pub fn with_boost_scale(mut self, scale: f64) -> Self {
        self.boost_scale = scale.max(0.0);
        self
    }
}

/// Configuration for assembling scored events into final clip ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Context padding added before and after each surviving event, seconds.
    pub buffer_seconds: f64,

    /// Events with `final_score` below this are dropped before assembly.
    pub min_score: f64,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            buffer_seconds: 5.0,
            min_score: 6.0,
        }
    }
}

impl AssemblyConfig {
    /// Builder-style setter for the context buffer.
    pub fn with_buffer(mut self, secs: f64) -> Self {
        self.buffer_seconds = secs.max(0.0);
        self
    }

    /// Builder-style setter for the score cutoff.
    pub fn with_min_score(mut self, score: f64) -> Self {
        self.min_score = score;
        self
    }
}
