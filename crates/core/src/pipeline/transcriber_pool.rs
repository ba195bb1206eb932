use std::sync::Arc;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::transcription::domain::segment::Segment;
use crate::transcription::domain::segment_result::SegmentResult;

/// Abstracts how segments are fanned out to the recognition service.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations (e.g. threaded).
pub trait TranscriberPool: Send {
    /// Transcribe every segment, returning exactly one result per segment
    /// in segment order regardless of completion order. Segment failures
    /// degrade to empty-text results; this call itself cannot fail.
    fn transcribe_all(
        &self,
        segments: &[Segment],
        reader: Arc<dyn AudioReader>,
        recognizer: Arc<dyn SpeechRecognizer>,
        logger: &mut dyn PipelineLogger,
    ) -> Vec<SegmentResult>;
}
