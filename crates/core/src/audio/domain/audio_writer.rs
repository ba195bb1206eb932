use std::path::Path;

use crate::audio::domain::audio_buffer::AudioBuffer;

/// Domain interface for exporting a PCM buffer as a canonical WAV file.
pub trait AudioWriter: Send + Sync {
    fn write_audio(
        &self,
        path: &Path,
        audio: &AudioBuffer,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
