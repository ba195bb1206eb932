use thiserror::Error;

use crate::audio::domain::audio_buffer::AudioBuffer;

/// Failure classes the external recognition service can signal.
///
/// `NoSpeech` means the service understood nothing in the buffer;
/// `Service` is a transport or server-side failure. Both degrade to an
/// empty-text segment, but they must stay distinguishable in diagnostics.
#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("no speech recognized")]
    NoSpeech,
    #[error("recognition service request failed: {0}")]
    Service(String),
}

/// Domain interface for speech-to-text transcription of a PCM buffer.
pub trait SpeechRecognizer: Send + Sync {
    fn transcribe(&self, audio: &AudioBuffer) -> Result<String, RecognitionError>;
}
