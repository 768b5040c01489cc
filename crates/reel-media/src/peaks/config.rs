//! Configuration for audio peak detection.

use serde::{Deserialize, Serialize};

/// Sample rate the audio track is normalized to before analysis.
pub(crate) const ANALYSIS_SAMPLE_RATE: u32 = 16_000;

/// Configuration for audio peak detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakDetectionConfig {
    /// Normalized energy threshold for declaring a peak (0.0-1.0).
    ///
    /// Relative to the loudest frame of the clip, not an absolute level:
    /// - Lower values (0.5-0.6): more peaks, quieter crowd reactions count
    /// - Default (0.7): sustained roars and whistles
    /// - Higher values (0.8-0.9): only the loudest moments
    pub threshold: f64,

    /// Analysis frame length in milliseconds.
    pub frame_ms: u64,

    /// Hop between frame starts in milliseconds. A hop shorter than the
    /// frame gives overlapping frames and a smoother envelope.
    pub hop_ms: u64,
}

impl Default for PeakDetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            frame_ms: 50,
            hop_ms: 25,
        }
    }
}

impl PeakDetectionConfig {
    /// Builder-style setter for the peak threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Frame length in samples at the analysis sample rate.
    pub(crate) fn frame_len(&self) -> usize {
        (ANALYSIS_SAMPLE_RATE as u64 * self.frame_ms / 1000) as usize
    }

    /// Hop length in samples at the analysis sample rate.
    pub(crate) fn hop_len(&self) -> usize {
        ((ANALYSIS_SAMPLE_RATE as u64 * self.hop_ms / 1000) as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PeakDetectionConfig::default();
        assert!((config.threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.frame_len(), 800);
        assert_eq!(config.hop_len(), 400);
    }

    #[test]
    fn test_threshold_clamping() {
        let config = PeakDetectionConfig::default().with_threshold(1.5);
        assert!((config.threshold - 1.0).abs() < f64::EPSILON);

        let config = PeakDetectionConfig::default().with_threshold(-0.2);
        assert!(config.threshold.abs() < f64::EPSILON);
    }
}
