//! Clip extraction and reel rendering.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, warn};

use reel_models::{ClipRange, EncodingConfig};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Extract a single clip range from a video, re-encoding.
///
/// A keyframe is forced at the first frame so the segments concatenate
/// cleanly with stream copy afterwards.
pub async fn extract_clip(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    range: &ClipRange,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        input = %input.display(),
        output = %output.display(),
        start = range.start,
        duration = range.duration(),
        "Extracting clip"
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(range.start)
        .duration(range.duration())
        .output_args(encoding.to_ffmpeg_args())
        .output_args(["-force_key_frames", "expr:eq(n,0)"])
        .output_args(["-movflags", "+faststart"]);

    FfmpegRunner::new().run(&cmd).await
}

/// Concatenate already-encoded clips into one file with the concat demuxer.
///
/// All inputs must share the same encoding (which [`extract_clip`]
/// guarantees); stream copy avoids a second encode pass.
pub async fn concat_clips(segments: &[PathBuf], output: &Path) -> MediaResult<()> {
    if segments.is_empty() {
        return Err(MediaError::NoClips);
    }

    if segments.len() == 1 {
        // Just copy the single segment
        tokio::fs::copy(&segments[0], output).await?;
        return Ok(());
    }

    let concat_list_path = output.with_extension("concat.txt");
    let concat_content = concat_list(segments);
    tokio::fs::write(&concat_list_path, &concat_content).await?;

    let result = Command::new("ffmpeg")
        .args([
            "-y",
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
            concat_list_path.to_str().unwrap_or(""),
            "-c",
            "copy",
            "-movflags",
            "+faststart",
            output.to_str().unwrap_or(""),
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    tokio::fs::remove_file(&concat_list_path).await.ok();

    if !result.status.success() {
        return Err(MediaError::ffmpeg_failed(
            "Concat failed",
            Some(String::from_utf8_lossy(&result.stderr).to_string()),
            result.status.code(),
        ));
    }

    Ok(())
}

/// Render a highlight reel: cut every clip range from the source video in
/// order and concatenate the pieces.
///
/// Ranges must already be ordered and disjoint (the assembler contract);
/// this function cuts and joins them as given to preserve chronological
/// flow. Intermediate segments are written to `workdir` and removed on
/// success.
pub async fn render_reel(
    input: impl AsRef<Path>,
    ranges: &[ClipRange],
    output: impl AsRef<Path>,
    encoding: &EncodingConfig,
    workdir: impl AsRef<Path>,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();
    let workdir = workdir.as_ref();

    if ranges.is_empty() {
        return Err(MediaError::NoClips);
    }

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    tokio::fs::create_dir_all(workdir).await?;

    let mut segment_paths = Vec::with_capacity(ranges.len());
    for (idx, range) in ranges.iter().enumerate() {
        let segment_path = workdir.join(format!("clip_{:03}.mp4", idx));
        extract_clip(input, &segment_path, range, encoding).await?;
        segment_paths.push(segment_path);
    }

    concat_clips(&segment_paths, output).await?;

    for path in &segment_paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove intermediate segment");
        }
    }

    info!(
        clips = ranges.len(),
        output = %output.display(),
        "Highlight reel rendered"
    );

    Ok(())
}

/// Build the concat demuxer list file contents.
fn concat_list(segments: &[PathBuf]) -> String {
    segments
        .iter()
        .map(|p| format!("file '{}'", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_list_format() {
        let segments = vec![
            PathBuf::from("/tmp/clip_000.mp4"),
            PathBuf::from("/tmp/clip_001.mp4"),
        ];
        let list = concat_list(&segments);
        assert_eq!(list, "file '/tmp/clip_000.mp4'\nfile '/tmp/clip_001.mp4'");
    }

    #[tokio::test]
    async fn test_concat_empty_is_no_clips() {
        let result = concat_clips(&[], Path::new("/tmp/out.mp4")).await;
        assert!(matches!(result, Err(MediaError::NoClips)));
    }

    #[tokio::test]
    async fn test_render_reel_empty_ranges() {
        let result = render_reel(
            "/tmp/in.mp4",
            &[],
            "/tmp/out.mp4",
            &EncodingConfig::default(),
            "/tmp/work",
        )
        .await;
        assert!(matches!(result, Err(MediaError::NoClips)));
    }

    #[tokio::test]
    async fn test_render_reel_missing_input() {
        let ranges = vec![ClipRange {
            start: 0.0,
            end: 5.0,
            source_score: 8.0,
        }];
        let result = render_reel(
            "/nonexistent/in.mp4",
            &ranges,
            "/tmp/out.mp4",
            &EncodingConfig::default(),
            "/tmp/work",
        )
        .await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
