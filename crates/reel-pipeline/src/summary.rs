//! Text summary of the detected highlights.
//!
//! Renders the ranked event list alongside the final cut list so a reader
//! can skim the match without watching the reel.

use std::path::Path;

use reel_models::{format_clock, total_duration, ClipRange, ScoredEvent};

use crate::error::PipelineResult;

/// Render the highlight summary as plain text.
///
/// `events` are expected in rank order (score descending); `clips` in
/// chronological order, as the assembler emits them.
pub fn render_summary(events: &[ScoredEvent], clips: &[ClipRange]) -> String {
    let mut out = String::new();

    out.push_str("SPORTS HIGHLIGHT SUMMARY\n");
    out.push_str(&format!(
        "Generated: {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&"=".repeat(60));
    out.push('\n');

    if events.is_empty() {
        out.push_str("\nNo highlights detected.\n");
        return out;
    }

    out.push_str("\nTop moments (by confidence):\n\n");
    for (rank, event) in events.iter().enumerate() {
        let marker = if event.audio_corroborated() {
            " [crowd]"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:2}. [{} - {}] score {:.0}{}\n    {}\n",
            rank + 1,
            format_clock(event.start),
            format_clock(event.end),
            event.final_score,
            marker,
            event.description,
        ));
    }

    out.push('\n');
    out.push_str(&"-".repeat(60));
    out.push('\n');
    out.push_str(&format!(
        "Reel: {} clip(s), {} total\n",
        clips.len(),
        format_clock(total_duration(clips))
    ));
    for clip in clips {
        out.push_str(&format!(
            "  [{} - {}]\n",
            format_clock(clip.start),
            format_clock(clip.end)
        ));
    }

    out
}

/// Write the summary next to the reel.
pub async fn write_summary(
    path: impl AsRef<Path>,
    events: &[ScoredEvent],
    clips: &[ClipRange],
) -> PipelineResult<()> {
    let summary = render_summary(events, clips);
    tokio::fs::write(path.as_ref(), summary).await?;
    Ok(())
}
