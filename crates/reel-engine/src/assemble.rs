//! Assembly of scored events into a final, disjoint cut list.
//!
//! Filter by score, pad for context, clamp to the video bounds, then a
//! single left-to-right merge sweep over the start-sorted intervals. The
//! sweep is sequential by construction: each merge decision depends on the
//! previous one.

use tracing::debug;

use reel_models::{ClipRange, ScoredEvent};

use crate::config::AssemblyConfig;

/// Assemble scored events into ordered, pairwise-disjoint clip ranges.
///
/// Guarantees on the output:
/// - sorted ascending by `start`
/// - `clip[i].end <= clip[i+1].start` for all adjacent pairs
/// - every range within `[0, video_duration]`
/// - `source_score` of a merged range is the maximum of the scores it
///   absorbed, so merging never demotes a high-confidence segment
///
/// An empty result is a normal "no highlights found" outcome, not an error.
pub fn assemble(
    events: &[ScoredEvent],
    config: &AssemblyConfig,
    video_duration: f64,
) -> Vec<ClipRange> {
    // Filter, pad and clamp in one pass. Events whose padded interval lies
    // entirely outside the video are dropped; partial overlap is clipped to
    // the boundary.
    let mut padded: Vec<ClipRange> = events
        .iter()
        .filter(|e| e.final_score >= config.min_score)
        .filter_map(|e| {
            let start = (e.start - config.buffer_seconds).max(0.0);
            let end = (e.end + config.buffer_seconds).min(video_duration);
            if start >= end {
                debug!(
                    start = e.start,
                    end = e.end,
                    video_duration,
                    "Dropping event outside video bounds"
                );
                return None;
            }
            Some(ClipRange {
                start,
                end,
                source_score: e.final_score,
            })
        })
        .collect();

    padded.sort_by(|a, b| a.start.total_cmp(&b.start));

    // Merge sweep: absorb every interval that overlaps or touches the
    // current one. Index-based so the disjointness invariant is visible.
    let mut merged: Vec<ClipRange> = Vec::with_capacity(padded.len());
    let mut i = 0;
    while i < padded.len() {
        let mut current = padded[i].clone();
        let mut j = i + 1;
        while j < padded.len() && padded[j].start <= current.end {
            current.end = current.end.max(padded[j].end);
            current.source_score = current.source_score.max(padded[j].source_score);
            j += 1;
        }
        merged.push(current);
        i = j;
    }

    debug!(
        events = events.len(),
        surviving = padded.len(),
        clips = merged.len(),
        "Assembled clip ranges"
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: f64, end: f64, final_score: f64) -> ScoredEvent {
        ScoredEvent {
            start,
            end,
            description: "play".to_string(),
            base_score: final_score,
            audio_boost: 0.0,
            final_score,
        }
    }

    fn assert_disjoint_and_sorted(clips: &[ClipRange]) {
        for pair in clips.windows(2) {
            assert!(pair[0].start <= pair[1].start, "not sorted by start");
            assert!(
                pair[0].end <= pair[1].start,
                "ranges overlap: [{}, {}] and [{}, {}]",
                pair[0].start,
                pair[0].end,
                pair[1].start,
                pair[1].end
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let clips = assemble(&[], &AssemblyConfig::default(), 600.0);
        assert!(clips.is_empty());
    }

    #[test]
    fn test_score_filter_drops_below_min() {
        let events = vec![
            event(10.0, 15.0, 4.0),
            event(100.0, 105.0, 6.0),
            event(200.0, 205.0, 9.0),
        ];
        let config = AssemblyConfig::default().with_min_score(6.0).with_buffer(0.0);

        let clips = assemble(&events, &config, 600.0);
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].start, 100.0);
        assert_eq!(clips[1].start, 200.0);
    }

    #[test]
    fn test_padded_neighbors_merge() {
        // [5,8] and [9,12] with buffer 2 pad to [3,10] and [7,14]; they
        // overlap (7 <= 10) and merge into a single [3,14] range.
        let events = vec![event(5.0, 8.0, 7.0), event(9.0, 12.0, 8.0)];
        let config = AssemblyConfig::default().with_buffer(2.0).with_min_score(6.0);

        let clips = assemble(&events, &config, 600.0);
        assert_eq!(clips.len(), 1);
        assert!((clips[0].start - 3.0).abs() < 0.001);
        assert!((clips[0].end - 14.0).abs() < 0.001);
        // Merge keeps the higher score.
        assert!((clips[0].source_score - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_contiguous_ranges_merge() {
        let events = vec![event(10.0, 20.0, 7.0), event(20.0, 30.0, 7.0)];
        let config = AssemblyConfig::default().with_buffer(0.0);

        let clips = assemble(&events, &config, 600.0);
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].start, 10.0);
        assert_eq!(clips[0].end, 30.0);
    }

    #[test]
    fn test_boundary_clipping() {
        // Padded start goes negative and padded end exceeds the duration;
        // both are clipped exactly to the boundary, never dropped.
        let events = vec![event(2.0, 6.0, 8.0), event(95.0, 99.0, 8.0)];
        let config = AssemblyConfig::default().with_buffer(5.0);

        let clips = assemble(&events, &config, 100.0);
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].start, 0.0);
        assert!((clips[0].end - 11.0).abs() < 0.001);
        assert!((clips[1].start - 90.0).abs() < 0.001);
        assert_eq!(clips[1].end, 100.0);
    }

    #[test]
    fn test_event_entirely_outside_bounds_is_dropped() {
        let events = vec![event(500.0, 510.0, 9.0)];
        let config = AssemblyConfig::default().with_buffer(2.0);

        let clips = assemble(&events, &config, 100.0);
        assert!(clips.is_empty());
    }

    #[test]
    fn test_padded_range_swallowing_whole_video() {
        let events = vec![event(10.0, 20.0, 9.0)];
        let config = AssemblyConfig::default().with_buffer(60.0);

        let clips = assemble(&events, &config, 30.0);
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].start, 0.0);
        assert_eq!(clips[0].end, 30.0);
    }

    #[test]
    fn test_output_disjoint_and_sorted_for_unsorted_input() {
        let events = vec![
            event(300.0, 310.0, 7.0),
            event(20.0, 30.0, 8.0),
            event(25.0, 40.0, 6.0),
            event(305.0, 320.0, 9.0),
            event(150.0, 160.0, 7.5),
        ];
        let config = AssemblyConfig::default().with_buffer(3.0);

        let clips = assemble(&events, &config, 600.0);
        assert_disjoint_and_sorted(&clips);
        assert_eq!(clips.len(), 3);
    }

    #[test]
    fn test_idempotent_on_own_output_with_zero_buffer() {
        let events = vec![
            event(10.0, 20.0, 7.0),
            event(18.0, 35.0, 9.0),
            event(100.0, 120.0, 6.0),
        ];
        let config = AssemblyConfig::default().with_buffer(4.0);
        let clips = assemble(&events, &config, 600.0);

        // Re-run the assembler over its own output with zero buffer.
        let as_events: Vec<ScoredEvent> = clips
            .iter()
            .map(|c| event(c.start, c.end, c.source_score))
            .collect();
        let rerun = assemble(&as_events, &AssemblyConfig::default().with_buffer(0.0), 600.0);

        assert_eq!(rerun, clips);
    }
}
