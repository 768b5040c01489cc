//! Peak picking and the FFmpeg-backed detection entry point.
//!
//! # Run collapsing
//!
//! A single loud event (a goal, a roar) keeps the envelope above threshold
//! for many consecutive frames. Emitting one peak per frame would flood the
//! fusion stage with near-identical peaks, so each contiguous
//! above-threshold run collapses into one peak at its loudest frame:
//!
//! ```text
//!                 value >= threshold
//!     ┌──────────────────────────────────┐
//!     ▼                                  │
//! ┌───────┐                          ┌───────┐
//! │ InRun │──────────────────────────│ Below │
//! └───────┘   value < threshold,     └───────┘
//!             emit peak at run max
//! ```

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use reel_models::AudioPeak;

use crate::error::{MediaError, MediaResult};
use crate::peaks::config::{PeakDetectionConfig, ANALYSIS_SAMPLE_RATE};
use crate::peaks::envelope::{normalize_envelope, rms_envelope};

/// Internal state for the run-collapsing sweep.
enum State {
    /// Below threshold.
    Below,
    /// Inside an above-threshold run, tracking its loudest frame.
    InRun { best_idx: usize, best_mag: f32 },
}

/// Collapse above-threshold runs of a normalized envelope into peaks.
///
/// `hop_secs` is the time between adjacent envelope frames and
/// `frame_center_secs` the offset of a frame's center from its start; a
/// peak's timestamp is the center of its loudest frame. Output is ordered
/// ascending by timestamp by construction.
pub fn pick_peaks(
    envelope: &[f32],
    threshold: f64,
    hop_secs: f64,
    frame_center_secs: f64,
) -> Vec<AudioPeak> {
    let threshold = threshold as f32;
    let mut peaks = Vec::new();
    let mut state = State::Below;

    for (idx, &value) in envelope.iter().enumerate() {
        state = match state {
            State::Below if value >= threshold => State::InRun {
                best_idx: idx,
                best_mag: value,
            },
            State::InRun { best_idx, best_mag } if value >= threshold => {
                if value > best_mag {
                    State::InRun {
                        best_idx: idx,
                        best_mag: value,
                    }
                } else {
                    State::InRun { best_idx, best_mag }
                }
            }
            State::InRun { best_idx, best_mag } => {
                peaks.push(AudioPeak::new(
                    best_idx as f64 * hop_secs + frame_center_secs,
                    best_mag as f64,
                ));
                State::Below
            }
            State::Below => State::Below,
        };
    }

    // Run still open at the end of the envelope
    if let State::InRun { best_idx, best_mag } = state {
        peaks.push(AudioPeak::new(
            best_idx as f64 * hop_secs + frame_center_secs,
            best_mag as f64,
        ));
    }

    peaks
}

/// Detect audio energy peaks in a video's soundtrack.
///
/// Extracts the audio track to 16kHz mono f32 samples, computes a normalized
/// RMS envelope and collapses above-threshold runs into peaks ordered by
/// timestamp.
///
/// # Errors
/// [`MediaError::AudioExtraction`] / [`MediaError::NoAudioStream`] when the
/// track cannot be decoded; callers may treat this as "no audio
/// corroboration" and proceed with zero peaks. Silent audio is NOT an error
/// and yields an empty vec.
pub async fn detect_peaks(
    video_path: impl AsRef<Path>,
    config: &PeakDetectionConfig,
) -> MediaResult<Vec<AudioPeak>> {
    let video_path = video_path.as_ref();

    if !video_path.exists() {
        return Err(MediaError::FileNotFound(video_path.to_path_buf()));
    }

    debug!(
        path = %video_path.display(),
        threshold = config.threshold,
        frame_ms = config.frame_ms,
        hop_ms = config.hop_ms,
        "Starting audio peak detection"
    );

    // Extract to a scoped temp file; released on all exit paths.
    let temp_audio = NamedTempFile::new()?;
    extract_audio(video_path, temp_audio.path()).await?;

    let samples = load_audio_samples(temp_audio.path()).await?;
    if samples.is_empty() {
        return Err(MediaError::NoAudioStream);
    }

    let frame_len = config.frame_len();
    let hop_len = config.hop_len();

    if samples.len() < frame_len {
        debug!(
            samples = samples.len(),
            frame_len, "Audio shorter than one analysis frame"
        );
        return Ok(Vec::new());
    }

    let mut envelope = rms_envelope(&samples, frame_len, hop_len);
    if !normalize_envelope(&mut envelope) {
        debug!("Audio is silent, no peaks");
        return Ok(Vec::new());
    }

    let hop_secs = hop_len as f64 / ANALYSIS_SAMPLE_RATE as f64;
    let frame_center_secs = (frame_len / 2) as f64 / ANALYSIS_SAMPLE_RATE as f64;
    let peaks = pick_peaks(&envelope, config.threshold, hop_secs, frame_center_secs);

    info!(
        frames = envelope.len(),
        peaks = peaks.len(),
        duration_secs = samples.len() as f64 / ANALYSIS_SAMPLE_RATE as f64,
        "Audio peak detection complete"
    );

    Ok(peaks)
}

/// Extract the audio track to 16kHz mono raw f32le PCM.
async fn extract_audio(input: &Path, output: &Path) -> MediaResult<()> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    let result = tokio::process::Command::new("ffmpeg")
        .args([
            "-y",
            "-hide_banner",
            "-loglevel",
            "error",
            "-i",
            input.to_str().unwrap_or_default(),
            "-vn", // No video
            "-ar",
            &ANALYSIS_SAMPLE_RATE.to_string(),
            "-ac",
            "1", // Mono
            "-f",
            "f32le", // Raw 32-bit float little-endian
            output.to_str().unwrap_or_default(),
        ])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .output()
        .await
        .map_err(|e| MediaError::audio_extraction(e.to_string()))?;

    if !result.status.success() {
        return Err(MediaError::audio_extraction(format!(
            "FFmpeg exited with code {:?}: {}",
            result.status.code(),
            String::from_utf8_lossy(&result.stderr).trim()
        )));
    }

    let metadata = tokio::fs::metadata(output).await?;
    if metadata.len() == 0 {
        return Err(MediaError::NoAudioStream);
    }

    Ok(())
}

/// Load raw f32le audio samples from a file.
async fn load_audio_samples(path: &Path) -> MediaResult<Vec<f32>> {
    let bytes = tokio::fs::read(path).await?;

    let samples: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Ok(samples)
}
