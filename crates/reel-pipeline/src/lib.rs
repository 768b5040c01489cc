//! Highlight reel pipeline orchestrator.
//!
//! Wires the stages end to end, once per video:
//! transcript → analyzer → audio peaks (optional, non-fatal) → fusion →
//! ranking → assembly → reel rendering → text summary.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod summary;
pub mod transcript;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{run_pipeline, PipelineOutcome, ReelOutput};
