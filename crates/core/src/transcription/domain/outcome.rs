use serde::Serialize;

use crate::transcription::domain::segment_result::SegmentResult;

/// Per-segment diagnostics, emitted only in verbose mode. Degraded
/// segments are retained as placeholders so operators can see which
/// segments produced nothing and why.
#[derive(Clone, Debug, Serialize)]
pub struct SegmentReport {
    pub index: usize,
    pub text: String,
    pub disposition: &'static str,
    pub noise_reduction_time: f64,
    pub recording_time: f64,
    pub transcription_time: f64,
}

/// Aggregate result of one pipeline run.
#[derive(Debug, Serialize)]
pub struct TranscriptionOutcome {
    pub text: String,
    pub total_time: f64,
    pub total_segments: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_details: Option<Vec<SegmentReport>>,
}

impl TranscriptionOutcome {
    /// Assemble the aggregate from per-segment results, which must already
    /// be in segmentation order.
    pub fn assemble(results: &[SegmentResult], total_time_secs: f64, verbose: bool) -> Self {
        let text = join_transcripts(results);
        let segment_details = verbose.then(|| results.iter().map(segment_report).collect());

        Self {
            text,
            total_time: round4(total_time_secs),
            total_segments: results.len(),
            segment_details,
        }
    }
}

/// Space-join the non-empty transcripts in index order. Empty segments
/// contribute nothing, not even a placeholder separator.
fn join_transcripts(results: &[SegmentResult]) -> String {
    results
        .iter()
        .map(SegmentResult::text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn segment_report(result: &SegmentResult) -> SegmentReport {
    let timings = result.timings();
    SegmentReport {
        index: result.index(),
        text: result.text().to_string(),
        disposition: result.outcome().disposition(),
        noise_reduction_time: round4(timings.noise_reduction),
        recording_time: round4(timings.recording),
        transcription_time: round4(timings.transcription),
    }
}

fn round4(secs: f64) -> f64 {
    (secs * 10_000.0).round() / 10_000.0
}
