use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use scribe_core::audio::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use scribe_core::audio::infrastructure::ffmpeg_audio_writer::FfmpegAudioWriter;
use scribe_core::audio::infrastructure::http_recognizer::HttpRecognizer;
use scribe_core::pipeline::infrastructure::threaded_transcriber_pool::ThreadedTranscriberPool;
use scribe_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use scribe_core::pipeline::transcribe_audio_use_case::{PipelineOptions, TranscribeAudioUseCase};
use scribe_core::shared::constants::{
    AUDIO_EXTENSIONS, DEFAULT_RECOGNITION_MODEL, DEFAULT_SEGMENT_DURATION_SECS,
    DEFAULT_SERVICE_URL,
};

const API_KEY_ENV: &str = "SCRIBE_API_KEY";
const SERVICE_URL_ENV: &str = "SCRIBE_SERVICE_URL";

/// Segmented parallel audio transcription via a speech-recognition service.
#[derive(Parser)]
#[command(name = "scribe")]
struct Cli {
    /// Input audio file.
    input: PathBuf,

    /// Write the outcome JSON to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Segment window in seconds.
    #[arg(long, default_value_t = DEFAULT_SEGMENT_DURATION_SECS)]
    segment_duration: u64,

    /// Worker threads for parallel transcription (default: CPU count).
    #[arg(long)]
    workers: Option<usize>,

    /// Include per-segment diagnostics in the outcome.
    #[arg(long)]
    verbose: bool,

    /// Base URL of the recognition service (or SCRIBE_SERVICE_URL).
    #[arg(long)]
    service_url: Option<String>,

    /// API key for the recognition service (or SCRIBE_API_KEY).
    #[arg(long)]
    api_key: Option<String>,

    /// Recognition model name.
    #[arg(long, default_value = DEFAULT_RECOGNITION_MODEL)]
    model: String,

    /// Per-request timeout in seconds (no timeout when omitted).
    #[arg(long)]
    request_timeout: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let service_url = cli
        .service_url
        .clone()
        .or_else(|| std::env::var(SERVICE_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .ok_or_else(|| format!("No API key: pass --api-key or set {API_KEY_ENV}"))?;

    let recognizer = HttpRecognizer::new(
        service_url,
        api_key,
        cli.model.clone(),
        cli.request_timeout.map(Duration::from_secs),
    )?;

    let use_case = TranscribeAudioUseCase::new(
        Arc::new(FfmpegAudioReader),
        Arc::new(FfmpegAudioWriter),
        Arc::new(recognizer),
        Box::new(ThreadedTranscriberPool::new(cli.workers)),
        PipelineOptions {
            segment_duration_secs: cli.segment_duration,
            verbose: cli.verbose,
        },
    );

    let mut logger = StdoutPipelineLogger::new();
    let outcome = use_case.run(&cli.input, &mut logger)?;

    let json = serde_json::to_string_pretty(&outcome)?;
    match cli.output {
        Some(ref path) => {
            std::fs::write(path, json)?;
            log::info!("Outcome written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.segment_duration == 0 {
        return Err("Segment duration must be a positive number of seconds".into());
    }
    if cli.workers == Some(0) {
        return Err("Worker count must be at least 1".into());
    }
    if cli.request_timeout == Some(0) {
        return Err("Request timeout must be at least 1 second".into());
    }
    if !has_audio_extension(&cli.input) {
        log::warn!(
            "Unrecognized audio extension on {}; attempting decode anyway",
            cli.input.display()
        );
    }
    Ok(())
}

fn has_audio_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
