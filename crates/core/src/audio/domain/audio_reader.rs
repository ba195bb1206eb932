use std::path::Path;

use crate::audio::domain::audio_buffer::AudioBuffer;

/// Domain interface for decoding an audio file.
pub trait AudioReader: Send + Sync {
    /// Decode the audio track to a mono PCM buffer at the given sample rate.
    /// Returns None if the file has no audio track.
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<AudioBuffer>, Box<dyn std::error::Error>>;

    /// Return the original sample rate and channel count without decoding.
    fn audio_metadata(&self, path: &Path)
        -> Result<Option<(u32, u16)>, Box<dyn std::error::Error>>;
}
