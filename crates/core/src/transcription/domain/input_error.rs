use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline errors. Everything here aborts the whole run before any
/// transcription happens; segment-level failures never surface as this
/// type.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read audio input {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("no audio track in {}", .path.display())]
    NoAudioTrack { path: PathBuf },
    #[error("audio input {} decoded to zero samples", .path.display())]
    EmptyAudio { path: PathBuf },
    #[error("failed to export segment {index}: {reason}")]
    SegmentExport { index: usize, reason: String },
    #[error("failed to create temporary workspace: {reason}")]
    Workspace { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_path() {
        let err = InputError::NoAudioTrack {
            path: PathBuf::from("/tmp/silent.mp4"),
        };
        assert!(err.to_string().contains("/tmp/silent.mp4"));
    }

    #[test]
    fn test_unreadable_keeps_the_cause() {
        let err = InputError::Unreadable {
            path: PathBuf::from("a.mp3"),
            reason: "Invalid data found".to_string(),
        };
        assert!(err.to_string().contains("Invalid data found"));
    }
}
