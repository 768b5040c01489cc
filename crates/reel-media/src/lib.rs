//! FFmpeg CLI wrapper for audio analysis and reel rendering.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with timeout support
//! - FFprobe media inspection (duration, audio stream presence)
//! - Audio peak detection from a video's soundtrack
//! - Clip extraction and concat-demuxer reel rendering

pub mod command;
pub mod error;
pub mod extract;
pub mod peaks;
pub mod probe;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use extract::{concat_clips, extract_clip, render_reel};
pub use peaks::{detect_peaks, PeakDetectionConfig};
pub use probe::{get_duration, probe_media, MediaInfo};
