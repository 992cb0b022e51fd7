//! Remote transcriber trait and test double.

use crate::config::RemoteConfig;
use crate::defaults;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// Failure of a remote transcription call.
///
/// Covers transport and service errors only. A call that completed but
/// produced empty text is not a `CallError`; the orchestrator judges
/// emptiness (and treats it as permanent) after a successful call.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct CallError {
    pub message: String,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parameters sent with every remote call.
#[derive(Debug, Clone)]
pub struct RemoteParams {
    pub model: String,
    pub temperature: f64,
}

impl Default for RemoteParams {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            temperature: defaults::TRANSCRIPTION_TEMPERATURE,
        }
    }
}

impl From<&RemoteConfig> for RemoteParams {
    fn from(config: &RemoteConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

/// Trait for remote speech-to-text transcription.
///
/// This trait allows swapping implementations (real HTTP service vs mock).
/// Implementations return the service's text fragments in emission order;
/// the caller concatenates them.
#[async_trait]
pub trait RemoteTranscriber: Send + Sync {
    /// Transcribe one audio artifact.
    ///
    /// # Arguments
    /// * `audio` - Complete encoded audio bytes for one unit
    /// * `params` - Model identifier and temperature
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        params: &RemoteParams,
    ) -> std::result::Result<Vec<String>, CallError>;
}

/// Implement RemoteTranscriber for Arc<T> to allow sharing.
#[async_trait]
impl<T: RemoteTranscriber> RemoteTranscriber for std::sync::Arc<T> {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        params: &RemoteParams,
    ) -> std::result::Result<Vec<String>, CallError> {
        (**self).transcribe(audio, params).await
    }
}

#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Fragments(Vec<String>),
    Failure(String),
}

/// Mock remote transcriber for testing.
///
/// Plays back a scripted sequence of outcomes, then repeats a fallback
/// response. Records how many calls were made.
#[derive(Debug)]
pub struct MockRemoteTranscriber {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    fallback: ScriptedOutcome,
    attempts: AtomicU32,
}

impl MockRemoteTranscriber {
    /// Create a mock whose every call succeeds with a stock response.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: ScriptedOutcome::Fragments(vec!["mock transcription.".to_string()]),
            attempts: AtomicU32::new(0),
        }
    }

    /// Set the fallback response used once the script is exhausted.
    pub fn with_response(mut self, text: &str) -> Self {
        self.fallback = ScriptedOutcome::Fragments(vec![text.to_string()]);
        self
    }

    /// Queue a successful call returning the given fragments.
    pub fn then_fragments(self, fragments: &[&str]) -> Self {
        self.push(ScriptedOutcome::Fragments(
            fragments.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Queue a failed call.
    pub fn then_failure(self, cause: &str) -> Self {
        self.push(ScriptedOutcome::Failure(cause.to_string()));
        self
    }

    /// Queue a call that succeeds but yields no text.
    pub fn then_empty(self) -> Self {
        self.push(ScriptedOutcome::Fragments(Vec::new()));
        self
    }

    /// Number of transcribe calls made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    fn push(&self, outcome: ScriptedOutcome) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(outcome);
    }

    fn next_outcome(&self) -> ScriptedOutcome {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Default for MockRemoteTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteTranscriber for MockRemoteTranscriber {
    async fn transcribe(
        &self,
        _audio: Vec<u8>,
        _params: &RemoteParams,
    ) -> std::result::Result<Vec<String>, CallError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.next_outcome() {
            ScriptedOutcome::Fragments(fragments) => Ok(fragments),
            ScriptedOutcome::Failure(cause) => Err(CallError::new(cause)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_fallback_response() {
        let mock = MockRemoteTranscriber::new().with_response("hello world.");

        let fragments = mock
            .transcribe(vec![0u8; 16], &RemoteParams::default())
            .await
            .unwrap();

        assert_eq!(fragments, vec!["hello world.".to_string()]);
        assert_eq!(mock.attempts(), 1);
    }

    #[tokio::test]
    async fn mock_plays_script_in_order() {
        let mock = MockRemoteTranscriber::new()
            .then_failure("connection reset")
            .then_fragments(&["first ", "second"]);

        let err = mock
            .transcribe(Vec::new(), &RemoteParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.message, "connection reset");

        let fragments = mock
            .transcribe(Vec::new(), &RemoteParams::default())
            .await
            .unwrap();
        assert_eq!(fragments, vec!["first ".to_string(), "second".to_string()]);

        assert_eq!(mock.attempts(), 2);
    }

    #[tokio::test]
    async fn mock_empty_outcome_yields_no_fragments() {
        let mock = MockRemoteTranscriber::new().then_empty();

        let fragments = mock
            .transcribe(Vec::new(), &RemoteParams::default())
            .await
            .unwrap();

        assert!(fragments.is_empty());
    }

    #[tokio::test]
    async fn trait_works_through_arc() {
        let mock = std::sync::Arc::new(MockRemoteTranscriber::new().with_response("shared."));

        let fragments = mock
            .transcribe(Vec::new(), &RemoteParams::default())
            .await
            .unwrap();

        assert_eq!(fragments, vec!["shared.".to_string()]);
    }

    #[test]
    fn params_from_remote_config() {
        let config = RemoteConfig {
            base_url: "https://example.test/v1".to_string(),
            model: "whisper-1".to_string(),
            temperature: 0.3,
        };

        let params = RemoteParams::from(&config);

        assert_eq!(params.model, "whisper-1");
        assert_eq!(params.temperature, 0.3);
    }

    #[test]
    fn default_params_match_defaults() {
        let params = RemoteParams::default();
        assert_eq!(params.model, defaults::DEFAULT_MODEL);
        assert_eq!(params.temperature, defaults::TRANSCRIPTION_TEMPERATURE);
    }
}
