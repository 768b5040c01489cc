//! Final clip range model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A final time interval to cut from the source video.
///
/// This is the boundary contract with the video extractor: ranges are
/// buffer-padded, clipped to the video bounds, pairwise disjoint and ordered
/// ascending by `start`. The extractor must cut and concatenate in the given
/// order to preserve chronological flow in the output reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipRange {
    /// Start of the cut, seconds.
    pub start: f64,

    /// End of the cut, seconds.
    pub end: f64,

    /// Highest `final_score` among the events this range covers.
    pub source_score: f64,
}

impl ClipRange {
    /// Duration of the cut in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Total duration of a clip sequence in seconds.
pub fn total_duration(clips: &[ClipRange]) -> f64 {
    clips.iter().map(ClipRange::duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let clip = ClipRange {
            start: 3.0,
            end: 14.0,
            source_score: 9.0,
        };
        assert!((clip.duration() - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_total_duration() {
        let clips = vec![
            ClipRange {
                start: 0.0,
                end: 10.0,
                source_score: 8.0,
            },
            ClipRange {
                start: 20.0,
                end: 25.0,
                source_score: 6.0,
            },
        ];
        assert!((total_duration(&clips) - 15.0).abs() < 0.001);
    }
}
