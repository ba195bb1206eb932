/// How one segment's transcription attempt resolved.
///
/// Only `Transcribed` carries text; every failure class degrades to an
/// empty contribution in the aggregate while keeping its cause for
/// diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentOutcome {
    /// The service returned a transcript (possibly empty).
    Transcribed(String),
    /// Recognition miss: the service understood no speech.
    NoSpeech,
    /// The service call failed (network or server error).
    ServiceFailed(String),
    /// Segment-local I/O or decode error.
    LocalFailed(String),
}

impl SegmentOutcome {
    pub fn text(&self) -> &str {
        match self {
            SegmentOutcome::Transcribed(text) => text,
            _ => "",
        }
    }

    pub fn disposition(&self) -> &'static str {
        match self {
            SegmentOutcome::Transcribed(_) => "transcribed",
            SegmentOutcome::NoSpeech => "no_speech",
            SegmentOutcome::ServiceFailed(_) => "service_failed",
            SegmentOutcome::LocalFailed(_) => "local_failed",
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, SegmentOutcome::Transcribed(_))
    }
}

/// Wall-clock cost of each per-segment stage, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageTimings {
    pub noise_reduction: f64,
    pub recording: f64,
    pub transcription: f64,
}

/// The outcome of transcribing one segment, keyed by segment index so the
/// aggregate can be reassembled in segmentation order.
#[derive(Clone, Debug)]
pub struct SegmentResult {
    index: usize,
    outcome: SegmentOutcome,
    timings: StageTimings,
}

impl SegmentResult {
    pub fn new(index: usize, outcome: SegmentOutcome, timings: StageTimings) -> Self {
        Self {
            index,
            outcome,
            timings,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn outcome(&self) -> &SegmentOutcome {
        &self.outcome
    }

    pub fn text(&self) -> &str {
        self.outcome.text()
    }

    pub fn timings(&self) -> StageTimings {
        self.timings
    }
}
