//! Highlight reel pipeline binary.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_analyzer::HighlightAnalyzer;
use reel_pipeline::{run_pipeline, PipelineConfig, PipelineOutcome};

struct CliArgs {
    video: PathBuf,
    transcript: PathBuf,
    output_dir: PathBuf,
    use_audio: bool,
}

fn print_usage() {
    eprintln!("Usage: reel-pipeline <video> <transcript.json> [-o OUTPUT_DIR] [--no-audio]");
    eprintln!();
    eprintln!("  <video>            Input video file");
    eprintln!("  <transcript.json>  Transcript document from the speech-to-text engine");
    eprintln!("  -o OUTPUT_DIR      Output directory (default: output)");
    eprintln!("  --no-audio         Skip audio peak analysis");
}

fn parse_args() -> Option<CliArgs> {
    let mut positional: Vec<String> = Vec::new();
    let mut output_dir = PathBuf::from("output");
    let mut use_audio = true;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                output_dir = PathBuf::from(args.next()?);
            }
            "--no-audio" => use_audio = false,
            "-h" | "--help" => return None,
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        return None;
    }

    Some(CliArgs {
        video: PathBuf::from(&positional[0]),
        transcript: PathBuf::from(&positional[1]),
        output_dir,
        use_audio,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("reel=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let Some(args) = parse_args() else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let config = PipelineConfig::from_env();
    info!(config = ?config, "Starting reel-pipeline");

    let analyzer = match HighlightAnalyzer::from_env() {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to create analyzer client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_pipeline(
        &analyzer,
        &args.video,
        &args.transcript,
        &args.output_dir,
        &config,
        args.use_audio,
    )
    .await
    {
        Ok(PipelineOutcome::Reel(output)) => {
            info!(
                reel = %output.reel_path.display(),
                summary = %output.summary_path.display(),
                clips = output.clip_count,
                "Highlight reel produced"
            );
            ExitCode::SUCCESS
        }
        Ok(PipelineOutcome::NoHighlights) => {
            info!("No highlight reel produced (nothing cleared the bar)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
