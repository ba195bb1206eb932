use std::sync::Arc;

use crate::audio::domain::audio_buffer::AudioBuffer;
use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_writer::AudioWriter;
use crate::shared::constants::CANONICAL_SAMPLE_RATE;
use crate::shared::temp_registry::TempFileRegistry;
use crate::transcription::domain::audio_source::AudioSource;
use crate::transcription::domain::input_error::InputError;
use crate::transcription::domain::segment::Segment;

/// Splits an audio source into fixed-duration segments.
///
/// Normalization decodes the source into the canonical form (mono PCM at
/// the canonical rate); slicing partitions it into contiguous windows of
/// `segment_duration_secs`, each exported as its own temp WAV. The last
/// window may be shorter. Segment temp files are tracked by the caller's
/// registry; the segmenter itself never deletes anything.
pub struct Segmenter {
    reader: Arc<dyn AudioReader>,
    writer: Arc<dyn AudioWriter>,
    segment_duration_secs: u64,
}

impl Segmenter {
    /// `segment_duration_secs` must be > 0.
    pub fn new(
        reader: Arc<dyn AudioReader>,
        writer: Arc<dyn AudioWriter>,
        segment_duration_secs: u64,
    ) -> Self {
        debug_assert!(segment_duration_secs > 0);
        Self {
            reader,
            writer,
            segment_duration_secs,
        }
    }

    /// Decode the source into canonical PCM. Unreadable or audio-less
    /// input is a terminal error for the whole pipeline.
    pub fn normalize(&self, source: &AudioSource) -> Result<AudioBuffer, InputError> {
        if source.format().is_canonical_container() {
            log::debug!(
                "{}: canonical container, decoding without conversion",
                source.path().display()
            );
        } else {
            log::info!(
                "{}: normalizing {} input to canonical form",
                source.path().display(),
                source.format().name()
            );
        }

        let buffer = self
            .reader
            .read_audio(source.path(), CANONICAL_SAMPLE_RATE)
            .map_err(|e| InputError::Unreadable {
                path: source.path().to_path_buf(),
                reason: e.to_string(),
            })?
            .ok_or_else(|| InputError::NoAudioTrack {
                path: source.path().to_path_buf(),
            })?;

        if buffer.is_empty() {
            return Err(InputError::EmptyAudio {
                path: source.path().to_path_buf(),
            });
        }

        Ok(buffer)
    }

    /// Partition the normalized buffer into segments covering the whole
    /// source with no gaps or overlaps, one temp WAV per window.
    pub fn slice(
        &self,
        buffer: &AudioBuffer,
        registry: &mut TempFileRegistry,
    ) -> Result<Vec<Segment>, InputError> {
        let samples_per_window = self.segment_duration_secs as usize * buffer.sample_rate() as usize;
        let total = buffer.len();

        let mut segments = Vec::new();
        let mut start = 0usize;
        while start < total {
            let index = segments.len();
            let end = (start + samples_per_window).min(total);
            let chunk = buffer.slice_samples(start, end);

            let path = registry.allocate(index);
            self.writer
                .write_audio(&path, &chunk)
                .map_err(|e| InputError::SegmentExport {
                    index,
                    reason: e.to_string(),
                })?;

            segments.push(Segment::new(
                index,
                start as f64 / buffer.sample_rate() as f64,
                chunk.duration(),
                path,
            ));
            start = end;
        }

        log::info!(
            "Split {:.1}s of audio into {} segment(s) of up to {}s",
            buffer.duration(),
            segments.len(),
            self.segment_duration_secs
        );
        Ok(segments)
    }

    /// Normalize then slice in one step.
    pub fn segment(
        &self,
        source: &AudioSource,
        registry: &mut TempFileRegistry,
    ) -> Result<Vec<Segment>, InputError> {
        let buffer = self.normalize(source)?;
        self.slice(&buffer, registry)
    }
}
