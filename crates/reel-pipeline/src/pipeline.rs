//! End-to-end pipeline orchestration.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use reel_analyzer::HighlightAnalyzer;
use reel_engine::{assemble, fuse, rank_events};
use reel_media::{detect_peaks, probe_media, render_reel};
use reel_models::{AudioPeak, EncodingConfig};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::summary::write_summary;
use crate::transcript::load_transcript;

/// Artifacts of a successful pipeline run.
#[derive(Debug)]
pub struct ReelOutput {
    /// The rendered highlight reel.
    pub reel_path: PathBuf,
    /// The text summary written next to it.
    pub summary_path: PathBuf,
    /// Number of clips cut into the reel.
    pub clip_count: usize,
}

/// Result of a pipeline run.
///
/// `NoHighlights` is a normal outcome, not an error: the transcript and any
/// other per-video processing may still have value without a reel.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// A reel was rendered.
    Reel(ReelOutput),
    /// Nothing cleared the bar; no reel was produced.
    NoHighlights,
}

/// Run the full highlight pipeline for one video.
///
/// The stages run as a single linear pass; audio analysis is an optional
/// enhancement and its failure degrades to zero peaks instead of aborting.
pub async fn run_pipeline(
    analyzer: &HighlightAnalyzer,
    video_path: impl AsRef<Path>,
    transcript_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &PipelineConfig,
    use_audio: bool,
) -> PipelineResult<PipelineOutcome> {
    let video_path = video_path.as_ref();
    let output_dir = output_dir.as_ref();

    let info = probe_media(video_path).await?;
    info!(
        video = %video_path.display(),
        duration_secs = info.duration,
        has_audio = info.has_audio,
        "Starting highlight pipeline"
    );

    let transcript = load_transcript(transcript_path.as_ref()).await?;

    let candidates = analyzer.analyze(&transcript).await?;
    if candidates.is_empty() {
        info!("Analyzer found no highlight candidates");
        return Ok(PipelineOutcome::NoHighlights);
    }
    info!(candidates = candidates.len(), "Got highlight candidates");

    let peaks = if use_audio {
        collect_peaks(video_path, config).await
    } else {
        info!("Audio analysis disabled");
        Vec::new()
    };

    let mut events = fuse(&peaks, &candidates, &config.fusion_config())?;
    rank_events(&mut events);

    let clips = assemble(&events, &config.assembly_config(), info.duration);
    if clips.is_empty() {
        info!(
            min_score = config.min_score,
            "No events cleared the score filter, no reel produced"
        );
        return Ok(PipelineOutcome::NoHighlights);
    }
    info!(clips = clips.len(), "Assembled clip ranges");

    tokio::fs::create_dir_all(output_dir).await?;
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string());

    let workdir = Path::new(&config.work_dir).join(&stem);
    let reel_path = output_dir.join(format!("{stem}_highlights.mp4"));
    render_reel(
        video_path,
        &clips,
        &reel_path,
        &EncodingConfig::default(),
        &workdir,
    )
    .await?;
    tokio::fs::remove_dir_all(&workdir).await.ok();

    let summary_path = output_dir.join(format!("{stem}_summary.txt"));
    write_summary(&summary_path, &events, &clips).await?;

    info!(
        reel = %reel_path.display(),
        summary = %summary_path.display(),
        clips = clips.len(),
        "Pipeline complete"
    );

    Ok(PipelineOutcome::Reel(ReelOutput {
        reel_path,
        summary_path,
        clip_count: clips.len(),
    }))
}

/// Detect audio peaks, degrading to none on any audio failure.
async fn collect_peaks(video_path: &Path, config: &PipelineConfig) -> Vec<AudioPeak> {
    match detect_peaks(video_path, &config.peak_config()).await {
        Ok(peaks) => {
            info!(peaks = peaks.len(), "Detected audio peaks");
            peaks
        }
        Err(e) if e.is_audio_failure() => {
            warn!(error = %e, "No usable audio track, continuing without peaks");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "Audio analysis failed, continuing without peaks");
            Vec::new()
        }
    }
}
