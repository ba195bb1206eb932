use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_writer::AudioWriter;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::transcriber_pool::TranscriberPool;
use crate::shared::constants::DEFAULT_SEGMENT_DURATION_SECS;
use crate::shared::temp_registry::TempFileRegistry;
use crate::transcription::domain::audio_source::AudioSource;
use crate::transcription::domain::input_error::InputError;
use crate::transcription::domain::outcome::TranscriptionOutcome;
use crate::transcription::domain::segmenter::Segmenter;

/// Tunables for one pipeline run.
pub struct PipelineOptions {
    /// Segment window in seconds. Must be > 0.
    pub segment_duration_secs: u64,
    /// Include per-segment diagnostics in the outcome.
    pub verbose: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            segment_duration_secs: DEFAULT_SEGMENT_DURATION_SECS,
            verbose: false,
        }
    }
}

/// Orchestrates the full transcription pipeline:
/// normalize → segment → transcribe (parallel) → aggregate → cleanup.
///
/// Owns its recognizer handle and temp-file registry per run — there is no
/// process-wide state. Only malformed input fails a run; segment-level
/// trouble degrades to empty text inside the outcome.
pub struct TranscribeAudioUseCase {
    reader: Arc<dyn AudioReader>,
    writer: Arc<dyn AudioWriter>,
    recognizer: Arc<dyn SpeechRecognizer>,
    pool: Box<dyn TranscriberPool>,
    options: PipelineOptions,
}

impl TranscribeAudioUseCase {
    pub fn new(
        reader: Arc<dyn AudioReader>,
        writer: Arc<dyn AudioWriter>,
        recognizer: Arc<dyn SpeechRecognizer>,
        pool: Box<dyn TranscriberPool>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            reader,
            writer,
            recognizer,
            pool,
            options,
        }
    }

    pub fn run(
        &self,
        input: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<TranscriptionOutcome, InputError> {
        let run_start = Instant::now();
        let source = AudioSource::from_path(input);

        let mut registry = TempFileRegistry::new().map_err(|e| InputError::Workspace {
            reason: e.to_string(),
        })?;

        let segmenter = Segmenter::new(
            self.reader.clone(),
            self.writer.clone(),
            self.options.segment_duration_secs,
        );

        let normalize_start = Instant::now();
        let buffer = match segmenter.normalize(&source) {
            Ok(buffer) => buffer,
            Err(e) => {
                registry.cleanup();
                return Err(e);
            }
        };
        logger.timing("normalize", normalize_start.elapsed().as_secs_f64() * 1000.0);

        let slice_start = Instant::now();
        let segments = match segmenter.slice(&buffer, &mut registry) {
            Ok(segments) => segments,
            Err(e) => {
                registry.cleanup();
                return Err(e);
            }
        };
        logger.timing("segment", slice_start.elapsed().as_secs_f64() * 1000.0);
        logger.metric("segments", segments.len() as f64);
        logger.info(&format!(
            "Transcribing {} segment(s) in parallel",
            segments.len()
        ));

        let results = self.pool.transcribe_all(
            &segments,
            self.reader.clone(),
            self.recognizer.clone(),
            logger,
        );
        debug_assert_eq!(results.len(), segments.len());

        let outcome = TranscriptionOutcome::assemble(
            &results,
            run_start.elapsed().as_secs_f64(),
            self.options.verbose,
        );

        registry.cleanup();
        logger.summary();
        Ok(outcome)
    }
}
