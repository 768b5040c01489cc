//! Audio peak model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A local maximum in the audio energy envelope.
///
/// Produced by the peak detector, consumed by the fusion engine. Immutable
/// once created; a detector output sequence is ordered ascending by
/// `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioPeak {
    /// Position in the video, seconds from the start.
    pub timestamp: f64,

    /// Energy relative to the loudest frame of the clip, in [0, 1].
    pub magnitude: f64,
}

impl AudioPeak {
    /// Create a new peak, clamping magnitude into the normalized range.
    pub fn new(timestamp: f64, magnitude: f64) -> Self {
        Self {
            timestamp: timestamp.max(0.0),
            magnitude: magnitude.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_magnitude() {
        let peak = AudioPeak::new(5.0, 1.5);
        assert_eq!(peak.magnitude, 1.0);

        let peak = AudioPeak::new(-1.0, -0.5);
        assert_eq!(peak.timestamp, 0.0);
        assert_eq!(peak.magnitude, 0.0);
    }
}
