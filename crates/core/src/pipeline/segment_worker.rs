use std::time::Instant;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::noise_calibration::NoiseCalibration;
use crate::audio::domain::speech_recognizer::{RecognitionError, SpeechRecognizer};
use crate::shared::constants::CANONICAL_SAMPLE_RATE;
use crate::transcription::domain::segment::Segment;
use crate::transcription::domain::segment_result::{SegmentOutcome, SegmentResult, StageTimings};

/// Runs the per-segment algorithm: decode the segment's temp WAV into
/// memory, calibrate for ambient noise, and submit the buffer to the
/// recognizer.
///
/// Every failure is segment-local: the worst any segment can do is
/// contribute empty text with its cause recorded in diagnostics.
pub fn transcribe_segment(
    segment: &Segment,
    reader: &dyn AudioReader,
    recognizer: &dyn SpeechRecognizer,
    calibration: &NoiseCalibration,
) -> SegmentResult {
    let mut timings = StageTimings::default();
    let index = segment.index();

    let record_start = Instant::now();
    let mut audio = match reader.read_audio(segment.path(), CANONICAL_SAMPLE_RATE) {
        Ok(Some(audio)) if !audio.is_empty() => audio,
        Ok(_) => {
            log::warn!("segment {index}: temp file decoded to no audio");
            return SegmentResult::new(
                index,
                SegmentOutcome::LocalFailed("segment decoded to no audio".to_string()),
                timings,
            );
        }
        Err(e) => {
            log::warn!("segment {index}: failed to read temp file: {e}");
            return SegmentResult::new(index, SegmentOutcome::LocalFailed(e.to_string()), timings);
        }
    };
    timings.recording = record_start.elapsed().as_secs_f64();

    // Calibration failure only costs recognition quality, never the segment.
    let noise_start = Instant::now();
    match calibration.calibrate(&mut audio) {
        Ok(profile) => log::debug!(
            "segment {index}: noise floor rms {:.5}, gate {:.5}",
            profile.noise_rms,
            profile.gate_threshold
        ),
        Err(e) => log::warn!("segment {index}: ambient-noise calibration skipped: {e}"),
    }
    timings.noise_reduction = noise_start.elapsed().as_secs_f64();

    let transcribe_start = Instant::now();
    let outcome = match recognizer.transcribe(&audio) {
        Ok(text) => SegmentOutcome::Transcribed(text),
        Err(RecognitionError::NoSpeech) => {
            log::debug!("segment {index}: no speech detected");
            SegmentOutcome::NoSpeech
        }
        Err(RecognitionError::Service(cause)) => {
            log::warn!("segment {index}: recognition request failed: {cause}");
            SegmentOutcome::ServiceFailed(cause)
        }
    };
    timings.transcription = transcribe_start.elapsed().as_secs_f64();

    SegmentResult::new(index, outcome, timings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::audio_buffer::AudioBuffer;
    use std::path::{Path, PathBuf};

    // ─── Stubs ───

    struct StubReader {
        buffer: Option<AudioBuffer>,
        fail: bool,
    }

    impl AudioReader for StubReader {
        fn read_audio(
            &self,
            _: &Path,
            _: u32,
        ) -> Result<Option<AudioBuffer>, Box<dyn std::error::Error>> {
            if self.fail {
                return Err("read error".into());
            }
            Ok(self.buffer.clone())
        }

        fn audio_metadata(
            &self,
            _: &Path,
        ) -> Result<Option<(u32, u16)>, Box<dyn std::error::Error>> {
            Ok(None)
        }
    }

    struct StubRecognizer {
        result: fn() -> Result<String, RecognitionError>,
    }

    impl SpeechRecognizer for StubRecognizer {
        fn transcribe(&self, _: &AudioBuffer) -> Result<String, RecognitionError> {
            (self.result)()
        }
    }

    fn segment() -> Segment {
        Segment::new(0, 0.0, 120.0, PathBuf::from("/tmp/segment_0000.wav"))
    }

    fn speech_buffer() -> AudioBuffer {
        AudioBuffer::new(vec![0.1; 16000], 16000)
    }

    fn run_worker(
        reader: StubReader,
        result: fn() -> Result<String, RecognitionError>,
    ) -> SegmentResult {
        transcribe_segment(
            &segment(),
            &reader,
            &StubRecognizer { result },
            &NoiseCalibration::new(1.0),
        )
    }

    // ─── Tests ───

    #[test]
    fn test_successful_recognition_yields_transcribed() {
        let result = run_worker(
            StubReader {
                buffer: Some(speech_buffer()),
                fail: false,
            },
            || Ok("hello".to_string()),
        );
        assert_eq!(result.outcome(), &SegmentOutcome::Transcribed("hello".into()));
        assert_eq!(result.text(), "hello");
    }

    #[test]
    fn test_no_speech_degrades_to_empty_not_error() {
        let result = run_worker(
            StubReader {
                buffer: Some(speech_buffer()),
                fail: false,
            },
            || Err(RecognitionError::NoSpeech),
        );
        assert_eq!(result.outcome(), &SegmentOutcome::NoSpeech);
        assert_eq!(result.text(), "");
    }

    #[test]
    fn test_service_failure_degrades_to_empty_with_cause() {
        let result = run_worker(
            StubReader {
                buffer: Some(speech_buffer()),
                fail: false,
            },
            || Err(RecognitionError::Service("503 Service Unavailable".into())),
        );
        assert_eq!(result.text(), "");
        match result.outcome() {
            SegmentOutcome::ServiceFailed(cause) => assert!(cause.contains("503")),
            other => panic!("expected ServiceFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_read_failure_degrades_to_local_failure() {
        let result = run_worker(
            StubReader {
                buffer: None,
                fail: true,
            },
            || Ok("unused".to_string()),
        );
        assert_eq!(result.text(), "");
        assert!(matches!(result.outcome(), SegmentOutcome::LocalFailed(_)));
    }

    #[test]
    fn test_empty_decode_degrades_to_local_failure() {
        let result = run_worker(
            StubReader {
                buffer: Some(AudioBuffer::new(vec![], 16000)),
                fail: false,
            },
            || Ok("unused".to_string()),
        );
        assert!(matches!(result.outcome(), SegmentOutcome::LocalFailed(_)));
    }

    #[test]
    fn test_stage_timings_are_recorded_on_success() {
        let result = run_worker(
            StubReader {
                buffer: Some(speech_buffer()),
                fail: false,
            },
            || Ok("hi".to_string()),
        );
        let timings = result.timings();
        assert!(timings.recording >= 0.0);
        assert!(timings.noise_reduction >= 0.0);
        assert!(timings.transcription >= 0.0);
    }
}
