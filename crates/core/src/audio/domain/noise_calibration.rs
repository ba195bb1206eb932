use thiserror::Error;

use crate::audio::domain::audio_buffer::AudioBuffer;

/// Gate threshold never exceeds this amplitude, so quiet speech survives
/// calibration against a noisy leading window.
const MAX_GATE_THRESHOLD: f32 = 0.02;

const DEFAULT_GATE_RATIO: f32 = 2.0;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("cannot calibrate an empty audio buffer")]
    EmptyBuffer,
}

/// Noise floor estimated from the leading window of a buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseProfile {
    pub noise_rms: f32,
    pub gate_threshold: f32,
}

/// Ambient-noise calibration: a fixed-cost pre-read over the leading
/// window of a segment.
///
/// The noise floor is the RMS of the first `window_secs` of audio; samples
/// below `gate_ratio` times the floor are zeroed. This only tunes
/// recognition quality — segmentation and aggregation never depend on it.
pub struct NoiseCalibration {
    window_secs: f64,
    gate_ratio: f32,
}

impl NoiseCalibration {
    pub fn new(window_secs: f64) -> Self {
        Self {
            window_secs,
            gate_ratio: DEFAULT_GATE_RATIO,
        }
    }

    pub fn with_gate_ratio(mut self, gate_ratio: f32) -> Self {
        self.gate_ratio = gate_ratio;
        self
    }

    /// Estimate the noise floor and gate the buffer in place.
    pub fn calibrate(&self, audio: &mut AudioBuffer) -> Result<NoiseProfile, CalibrationError> {
        let window = audio.leading_window(self.window_secs);
        if window.is_empty() {
            return Err(CalibrationError::EmptyBuffer);
        }

        let noise_rms = rms(window);
        let gate_threshold = (noise_rms * self.gate_ratio).min(MAX_GATE_THRESHOLD);

        if gate_threshold > 0.0 {
            for sample in audio.samples_mut() {
                if sample.abs() < gate_threshold {
                    *sample = 0.0;
                }
            }
        }

        Ok(NoiseProfile {
            noise_rms,
            gate_threshold,
        })
    }
}

fn rms(samples: &[f32]) -> f32 {
    let sum_sq: f64 = samples.iter().map(|s| (*s as f64) * (*s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}
