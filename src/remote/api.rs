//! HTTP transcription client.
//!
//! Talks to an OpenAI-compatible `/audio/transcriptions` endpoint:
//! multipart upload of the audio bytes, JSON response carrying either a
//! single `text` field or a `segments` array.

use crate::remote::transcriber::{CallError, RemoteParams, RemoteTranscriber};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    text: String,
}

/// Remote transcriber backed by an HTTP API.
pub struct HttpRemoteTranscriber {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpRemoteTranscriber {
    /// Create a client for the given API base URL and bearer token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }
}

/// Turn a parsed response into the fragment stream, in emission order.
///
/// Services that segment their output yield one fragment per segment;
/// otherwise the whole `text` field is a single fragment.
fn response_fragments(response: TranscriptionResponse) -> Vec<String> {
    if !response.segments.is_empty() {
        response.segments.into_iter().map(|s| s.text).collect()
    } else {
        response.text.into_iter().collect()
    }
}

#[async_trait]
impl RemoteTranscriber for HttpRemoteTranscriber {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        params: &RemoteParams,
    ) -> std::result::Result<Vec<String>, CallError> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| CallError::new(format!("Failed to build upload part: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .text("model", params.model.clone())
            .text("temperature", params.temperature.to_string())
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CallError::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CallError::new(format!(
                "Service returned status {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| CallError::new(format!("Failed to parse response: {}", e)))?;

        Ok(response_fragments(parsed))
    }
}
