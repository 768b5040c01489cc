//! Fusion of audio peaks with text highlight candidates.
//!
//! Audio energy alone never creates a highlight; it only amplifies
//! confidence in candidates already proposed by the text analyzer. A quiet
//! but decisive moment therefore keeps its base score, and a loud non-moment
//! stays out of the reel entirely.

use thiserror::Error;
use tracing::debug;

use reel_models::{AudioPeak, HighlightValidationError, ScoredEvent, TextHighlight};

use crate::config::FusionConfig;

/// Lower clamp bound for `final_score`.
pub const SCORE_FLOOR: f64 = 1.0;
/// Upper clamp bound for `final_score`.
pub const SCORE_CEIL: f64 = 10.0;

/// Errors from the fusion boundary.
#[derive(Debug, Error)]
pub enum FusionError {
    #[error("invalid highlight at index {index}: {source}")]
    InvalidHighlight {
        index: usize,
        #[source]
        source: HighlightValidationError,
    },
}

/// Fuse audio peaks with text highlight candidates into scored events.
///
/// Produces exactly one [`ScoredEvent`] per input [`TextHighlight`], in input
/// order; candidates are never dropped here, only by the later score filter
/// in assembly. Peaks must be ordered ascending by timestamp (the detector
/// contract); candidates may overlap and are left as-is.
///
/// # Errors
/// Returns [`FusionError::InvalidHighlight`] naming the first malformed
/// record; invalid ranges are never silently coerced.
pub fn fuse(
    peaks: &[AudioPeak],
    highlights: &[TextHighlight],
    config: &FusionConfig,
) -> Result<Vec<ScoredEvent>, FusionError> {
    for (index, highlight) in highlights.iter().enumerate() {
        highlight
            .validate()
            .map_err(|source| FusionError::InvalidHighlight { index, source })?;
    }

    let events = highlights
        .iter()
        .map(|h| {
            let matched = max_magnitude_in(peaks, h.start, h.end).or_else(|| {
                // No peak strictly inside the spoken range; widen the window
                // to absorb speech/audio timing drift.
                max_magnitude_in(
                    peaks,
                    h.start - config.match_tolerance_secs,
                    h.end + config.match_tolerance_secs,
                )
            });

            let audio_boost = match matched {
                Some(magnitude) => (magnitude * config.boost_scale).round(),
                None => 0.0,
            };

            let base_score = h.score as f64;
            let final_score = (base_score + audio_boost).clamp(SCORE_FLOOR, SCORE_CEIL);

            debug!(
                start = h.start,
                end = h.end,
                base_score,
                audio_boost,
                final_score,
                "Fused highlight candidate"
            );

            ScoredEvent {
                start: h.start,
                end: h.end,
                description: h.description.clone(),
                base_score,
                audio_boost,
                final_score,
            }
        })
        .collect();

    Ok(events)
}

/// Rank events by `final_score` descending, ties broken by `start` ascending.
///
/// The sort is stable and this ordering is a contract, not an implementation
/// detail: it decides which events survive when a caller truncates the list.
pub fn rank_events(events: &mut [ScoredEvent]) {
    events.sort_by(|a, b| {
        b.final_score
            .total_cmp(&a.final_score)
            .then(a.start.total_cmp(&b.start))
    });
}

/// Largest peak magnitude with a timestamp in `[lo, hi]`.
fn max_magnitude_in(peaks: &[AudioPeak], lo: f64, hi: f64) -> Option<f64> {
    peaks
        .iter()
        .filter(|p| p.timestamp >= lo && p.timestamp <= hi)
        .map(|p| p.magnitude)
        .fold(None, |best, m| match best {
            Some(b) if b >= m => Some(b),
            _ => Some(m),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(start: f64, end: f64, score: i64) -> TextHighlight {
        TextHighlight {
            start,
            end,
            description: format!("moment at {start}"),
            score,
        }
    }

    #[test]
    fn test_one_event_per_candidate() {
        let peaks = vec![AudioPeak::new(12.0, 0.9)];
        let highlights = vec![
            highlight(10.0, 15.0, 7),
            highlight(40.0, 44.0, 8),
            highlight(60.0, 65.0, 5),
        ];

        let events = fuse(&peaks, &highlights, &FusionConfig::default()).unwrap();
        assert_eq!(events.len(), highlights.len());
        // Input order preserved before ranking
        assert_eq!(events[0].start, 10.0);
        assert_eq!(events[2].start, 60.0);
    }

    #[test]
    fn test_boost_never_negative_and_final_at_least_base() {
        let peaks = vec![AudioPeak::new(5.0, 0.0), AudioPeak::new(50.0, 0.3)];
        let highlights = vec![highlight(4.0, 6.0, 3), highlight(100.0, 110.0, 9)];

        let events = fuse(&peaks, &highlights, &FusionConfig::default()).unwrap();
        for event in &events {
            assert!(event.audio_boost >= 0.0);
            assert!(event.final_score >= event.base_score);
        }
        // No peak anywhere near the second candidate
        assert_eq!(events[1].audio_boost, 0.0);
    }

    #[test]
    fn test_corroborated_event_outranks_higher_base() {
        // Peak at 12.0s magnitude 0.9, tolerance 2s, K=2: the first candidate
        // gets boost 2 (final 9), the second none (final 8).
        let peaks = vec![AudioPeak::new(12.0, 0.9)];
        let highlights = vec![highlight(10.0, 15.0, 7), highlight(40.0, 44.0, 8)];
        let config = FusionConfig::default().with_tolerance(2.0).with_boost_scale(2.0);

        let mut events = fuse(&peaks, &highlights, &config).unwrap();
        assert!((events[0].audio_boost - 2.0).abs() < 0.001);
        assert!((events[0].final_score - 9.0).abs() < 0.001);
        assert_eq!(events[1].audio_boost, 0.0);
        assert!((events[1].final_score - 8.0).abs() < 0.001);

        rank_events(&mut events);
        assert_eq!(events[0].start, 10.0);
        assert_eq!(events[1].start, 40.0);
    }

    #[test]
    fn test_tolerance_window_match() {
        // Peak 1.5s before the spoken range; matched only via tolerance.
        let peaks = vec![AudioPeak::new(8.5, 1.0)];
        let highlights = vec![highlight(10.0, 12.0, 6)];

        let strict = FusionConfig::default().with_tolerance(0.0);
        let events = fuse(&peaks, &highlights, &strict).unwrap();
        assert_eq!(events[0].audio_boost, 0.0);

        let tolerant = FusionConfig::default().with_tolerance(2.0);
        let events = fuse(&peaks, &highlights, &tolerant).unwrap();
        assert!((events[0].audio_boost - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_strongest_matching_peak_wins() {
        let peaks = vec![
            AudioPeak::new(10.5, 0.4),
            AudioPeak::new(11.0, 0.95),
            AudioPeak::new(13.0, 0.6),
        ];
        let highlights = vec![highlight(10.0, 14.0, 5)];

        let events = fuse(&peaks, &highlights, &FusionConfig::default()).unwrap();
        assert!((events[0].audio_boost - 2.0).abs() < 0.001); // round(0.95 * 2)
    }

    #[test]
    fn test_final_score_clamped_to_ceiling() {
        let peaks = vec![AudioPeak::new(10.0, 1.0)];
        let highlights = vec![highlight(9.0, 11.0, 10)];

        let events = fuse(&peaks, &highlights, &FusionConfig::default()).unwrap();
        assert!((events[0].final_score - SCORE_CEIL).abs() < 0.001);
        assert!(events[0].audio_boost > 0.0);
    }

    #[test]
    fn test_invalid_highlight_reports_index() {
        let highlights = vec![highlight(0.0, 5.0, 7), highlight(20.0, 10.0, 7)];
        let err = fuse(&[], &highlights, &FusionConfig::default()).unwrap_err();
        let FusionError::InvalidHighlight { index, .. } = err;
        assert_eq!(index, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let events = fuse(&[], &[], &FusionConfig::default()).unwrap();
        assert!(events.is_empty());

        // Peaks without candidates never create events on their own.
        let peaks = vec![AudioPeak::new(30.0, 1.0)];
        let events = fuse(&peaks, &[], &FusionConfig::default()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_rank_is_stable_for_exact_ties() {
        let mut events = vec![
            ScoredEvent {
                start: 50.0,
                end: 55.0,
                description: "b".to_string(),
                base_score: 7.0,
                audio_boost: 0.0,
                final_score: 7.0,
            },
            ScoredEvent {
                start: 10.0,
                end: 15.0,
                description: "a".to_string(),
                base_score: 7.0,
                audio_boost: 0.0,
                final_score: 7.0,
            },
        ];
        rank_events(&mut events);
        // Equal scores resolve by start ascending.
        assert_eq!(events[0].start, 10.0);
        assert_eq!(events[1].start, 50.0);
    }
}
