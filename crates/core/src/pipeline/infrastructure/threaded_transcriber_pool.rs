use std::sync::Arc;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::noise_calibration::NoiseCalibration;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::segment_worker::transcribe_segment;
use crate::pipeline::transcriber_pool::TranscriberPool;
use crate::shared::constants::NOISE_CALIBRATION_WINDOW_SECS;
use crate::transcription::domain::segment::Segment;
use crate::transcription::domain::segment_result::{SegmentOutcome, SegmentResult, StageTimings};

/// Bounded worker pool: N threads pull segments from a shared queue, each
/// blocking on its recognition call, and send `(index, result)` back to
/// the collector.
///
/// Results are written into a slot vector addressed by segment index, so
/// output order always equals segmentation order no matter which worker
/// finishes first. A panicking worker degrades its remaining segments to
/// empty-text results; it can never abort the batch.
pub struct ThreadedTranscriberPool {
    workers: usize,
    calibration_window_secs: f64,
}

impl ThreadedTranscriberPool {
    /// `workers` of None means one worker per available CPU.
    pub fn new(workers: Option<usize>) -> Self {
        Self {
            workers: workers.unwrap_or_else(available_workers).max(1),
            calibration_window_secs: NOISE_CALIBRATION_WINDOW_SECS,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedTranscriberPool {
    fn default() -> Self {
        Self::new(None)
    }
}

fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl TranscriberPool for ThreadedTranscriberPool {
    fn transcribe_all(
        &self,
        segments: &[Segment],
        reader: Arc<dyn AudioReader>,
        recognizer: Arc<dyn SpeechRecognizer>,
        logger: &mut dyn PipelineLogger,
    ) -> Vec<SegmentResult> {
        let total = segments.len();
        if total == 0 {
            return Vec::new();
        }

        let worker_count = self.workers.min(total);
        logger.metric("workers", worker_count as f64);

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Segment>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<SegmentResult>();

        for segment in segments {
            if job_tx.send(segment.clone()).is_err() {
                break;
            }
        }
        drop(job_tx);

        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let reader = reader.clone();
            let recognizer = recognizer.clone();
            let calibration = NoiseCalibration::new(self.calibration_window_secs);

            handles.push(std::thread::spawn(move || {
                for segment in job_rx {
                    let result = transcribe_segment(
                        &segment,
                        reader.as_ref(),
                        recognizer.as_ref(),
                        &calibration,
                    );
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(result_tx);

        // Index-preserving collection: each result lands in its segment's
        // slot, not at the tail of a completion-ordered list.
        let mut slots: Vec<Option<SegmentResult>> = (0..total).map(|_| None).collect();
        let mut completed = 0usize;
        for result in result_rx {
            logger.timing("transcribe", result.timings().transcription * 1000.0);
            completed += 1;
            logger.progress(completed, total);
            let index = result.index();
            if index < total {
                slots[index] = Some(result);
            }
        }

        for handle in handles {
            if handle.join().is_err() {
                log::warn!("transcriber worker thread panicked");
            }
        }

        // A panicked worker leaves its in-flight segment unfilled; degrade
        // that slot rather than shrinking the batch.
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    SegmentResult::new(
                        index,
                        SegmentOutcome::LocalFailed("worker thread panicked".to_string()),
                        StageTimings::default(),
                    )
                })
            })
            .collect()
    }
}
