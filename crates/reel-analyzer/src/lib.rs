//! Language-model transcript analyzer client.
//!
//! This crate is the boundary adapter in front of the external language
//! model: it builds the analysis prompt from a transcript, calls a
//! messages-style completion API with model fallback, and normalizes the
//! response into validated [`reel_models::TextHighlight`] records. The
//! model's judgement of what counts as exciting is not questioned here;
//! whatever it answers is normalized or rejected, never second-guessed.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{AnalyzerConfig, HighlightAnalyzer};
pub use error::{AnalyzerError, AnalyzerResult};
