//! Pipeline configuration.
//!
//! Every tunable the core depends on lives here and is passed down
//! explicitly; the engine never reads ambient process state.

use reel_engine::{AssemblyConfig, FusionConfig};
use reel_media::PeakDetectionConfig;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Normalized audio energy threshold for peak detection (0.0-1.0).
    pub audio_peak_threshold: f64,
    /// Context padding around each highlight, seconds.
    pub highlight_buffer_seconds: f64,
    /// Events scoring below this never reach the reel.
    pub min_score: f64,
    /// Peak-to-boost multiplier for fusion.
    pub boost_scale: f64,
    /// Peak matching tolerance around a candidate's range, seconds.
    pub match_tolerance_secs: f64,
    /// Work directory for intermediate clip segments.
    pub work_dir: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            audio_peak_threshold: 0.7,
            highlight_buffer_seconds: 5.0,
            min_score: 6.0,
            boost_scale: 2.0,
            match_tolerance_secs: 2.0,
            work_dir: "/tmp/sportsreel".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            audio_peak_threshold: env_parse("REEL_AUDIO_PEAK_THRESHOLD")
                .unwrap_or(defaults.audio_peak_threshold),
            highlight_buffer_seconds: env_parse("REEL_HIGHLIGHT_BUFFER_SECS")
                .unwrap_or(defaults.highlight_buffer_seconds),
            min_score: env_parse("REEL_MIN_SCORE").unwrap_or(defaults.min_score),
            boost_scale: env_parse("REEL_BOOST_SCALE").unwrap_or(defaults.boost_scale),
            match_tolerance_secs: env_parse("REEL_MATCH_TOLERANCE_SECS")
                .unwrap_or(defaults.match_tolerance_secs),
            work_dir: std::env::var("REEL_WORK_DIR").unwrap_or(defaults.work_dir),
        }
    }

    /// Peak detection settings derived from this config.
    pub fn peak_config(&self) -> PeakDetectionConfig {
        PeakDetectionConfig::default().with_threshold(self.audio_peak_threshold)
    }

    /// Fusion settings derived from this config.
    pub fn fusion_config(&self) -> FusionConfig {
        FusionConfig::default()
            .with_tolerance(self.match_tolerance_secs)
            .with_boost_scale(self.boost_scale)
    }

    /// Assembly settings derived from this config.
    pub fn assembly_config(&self) -> AssemblyConfig {
        AssemblyConfig::default()
            .with_buffer(self.highlight_buffer_seconds)
            .with_min_score(self.min_score)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_component_configs() {
        let config = PipelineConfig::default();
        assert!((config.peak_config().threshold - 0.7).abs() < f64::EPSILON);
        assert!((config.assembly_config().buffer_seconds - 5.0).abs() < f64::EPSILON);
        assert!((config.assembly_config().min_score - 6.0).abs() < f64::EPSILON);
        assert!((config.fusion_config().boost_scale - 2.0).abs() < f64::EPSILON);
    }
}
