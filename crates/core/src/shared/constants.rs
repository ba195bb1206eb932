/// Sample rate of the canonical decodable format all audio is normalized
/// to before segmentation and recognition.
pub const CANONICAL_SAMPLE_RATE: u32 = 16000;

/// Default segment window in seconds (2-minute chunks).
pub const DEFAULT_SEGMENT_DURATION_SECS: u64 = 120;

/// Leading window used for ambient-noise calibration, in seconds.
pub const NOISE_CALIBRATION_WINDOW_SECS: f64 = 1.0;

pub const DEFAULT_SERVICE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_RECOGNITION_MODEL: &str = "whisper-1";

pub const AUDIO_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "ogg", "oga", "flac", "m4a", "aac", "opus", "wma", "webm",
];
