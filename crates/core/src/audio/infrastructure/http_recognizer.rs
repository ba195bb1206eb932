use std::time::Duration;

use crate::audio::domain::audio_buffer::AudioBuffer;
use crate::audio::domain::speech_recognizer::{RecognitionError, SpeechRecognizer};

/// Recognition client for an OpenAI-compatible transcription endpoint.
///
/// Each buffer is packaged as a 16-bit PCM WAV and POSTed as a multipart
/// upload to `{base_url}/audio/transcriptions`. A 2xx response carrying an
/// empty transcript is a recognition miss, not an error; transport and
/// non-2xx failures map to `RecognitionError::Service`.
pub struct HttpRecognizer {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpRecognizer {
    /// `request_timeout` of None disables the per-request timeout, which is
    /// the reference behavior; long segments can take minutes to process.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Option<Duration>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for HttpRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecognizer")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl SpeechRecognizer for HttpRecognizer {
    fn transcribe(&self, audio: &AudioBuffer) -> Result<String, RecognitionError> {
        let wav = wav_bytes(audio);

        let part = reqwest::blocking::multipart::Part::bytes(wav)
            .file_name("segment.wav")
            .mime_str("audio/wav")
            .map_err(|e| RecognitionError::Service(e.to_string()))?;

        let form = reqwest::blocking::multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", part);

        let url = format!(
            "{}/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .map_err(|e| RecognitionError::Service(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let mut body = resp.text().unwrap_or_default();
            body.truncate(500);
            return Err(RecognitionError::Service(format!("{status}: {body}")));
        }

        let body = resp
            .text()
            .map_err(|e| RecognitionError::Service(e.to_string()))?;
        transcript_from_json(&body)
    }
}

/// Parse the service response body; an empty transcript is a miss.
fn transcript_from_json(body: &str) -> Result<String, RecognitionError> {
    let parsed: TranscriptionResponse = serde_json::from_str(body)
        .map_err(|e| RecognitionError::Service(format!("malformed response: {e}")))?;
    let text = parsed.text.trim();
    if text.is_empty() {
        return Err(RecognitionError::NoSpeech);
    }
    Ok(text.to_string())
}

/// Package mono PCM samples as a 16-bit WAV container in memory.
fn wav_bytes(audio: &AudioBuffer) -> Vec<u8> {
    let samples = audio.samples();
    let sample_rate = audio.sample_rate();
    let channels: u16 = 1;

    let data_len = (samples.len() * 2) as u32;
    let total_len = 36 + data_len;
    let mut out = Vec::with_capacity(44 + samples.len() * 2);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&total_len.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2 * channels as u32).to_le_bytes()); // byte rate
    out.extend_from_slice(&(2 * channels).to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        out.extend_from_slice(&value.to_le_bytes());
    }

    out
}
