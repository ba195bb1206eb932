use std::path::{Path, PathBuf};

/// Container formats recognized from the file extension. `Other` covers
/// anything else the codec library may still be able to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Flac,
    M4a,
    Other,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "wav" => AudioFormat::Wav,
            "mp3" => AudioFormat::Mp3,
            "ogg" | "oga" => AudioFormat::Ogg,
            "flac" => AudioFormat::Flac,
            "m4a" => AudioFormat::M4a,
            _ => AudioFormat::Other,
        }
    }

    /// Whether the container is already the canonical decodable one.
    pub fn is_canonical_container(self) -> bool {
        self == AudioFormat::Wav
    }

    pub fn name(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
            AudioFormat::M4a => "m4a",
            AudioFormat::Other => "other",
        }
    }
}

/// A reference to an input audio file with its inferred container format.
/// Immutable once accepted by the pipeline.
#[derive(Clone, Debug)]
pub struct AudioSource {
    path: PathBuf,
    format: AudioFormat,
}

impl AudioSource {
    pub fn from_path(path: &Path) -> Self {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(AudioFormat::from_extension)
            .unwrap_or(AudioFormat::Other);
        Self {
            path: path.to_path_buf(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }
}
