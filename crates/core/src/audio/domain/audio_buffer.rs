/// Decoded audio in the canonical form: mono PCM samples in [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn sample_index_at_time(&self, time: f64) -> usize {
        (time * self.sample_rate as f64) as usize
    }

    /// Copy out the sample range `[start, end)`, clamped to the buffer.
    pub fn slice_samples(&self, start: usize, end: usize) -> AudioBuffer {
        let end = end.min(self.samples.len());
        let start = start.min(end);
        AudioBuffer::new(self.samples[start..end].to_vec(), self.sample_rate)
    }

    /// The first `len_secs` of audio (the whole buffer if shorter).
    pub fn leading_window(&self, len_secs: f64) -> &[f32] {
        let end = self.sample_index_at_time(len_secs).min(self.samples.len());
        &self.samples[..end]
    }
}
