//! Per-unit transcription with retry and backoff.
//!
//! One "unit" is a single audio artifact: either the whole recording or
//! one chunk of it. Outcomes are classified into a tagged value so the
//! retry loop branches on the tag, not on error identity.

use crate::error::{ChunkscribeError, Result};
use crate::remote::{CallError, RemoteParams, RemoteTranscriber};
use std::path::Path;
use std::time::Duration;
use tracing::{error, warn};

/// Classified outcome of one remote call attempt.
#[derive(Debug)]
enum Attempt {
    Success(String),
    /// The call completed but produced nothing usable. Retrying cannot
    /// fix this.
    Permanent(String),
    /// Transport or service failure, plausibly recoverable.
    Transient(String),
}

fn classify(outcome: std::result::Result<Vec<String>, CallError>) -> Attempt {
    match outcome {
        Ok(fragments) => {
            let text = fragments.concat();
            if text.trim().is_empty() {
                Attempt::Permanent("service returned empty transcription".to_string())
            } else {
                Attempt::Success(text)
            }
        }
        Err(e) => Attempt::Transient(e.to_string()),
    }
}

/// Backoff before the next attempt: `base * 2^(attempt-1)` seconds.
fn backoff_delay(base_delay_seconds: u64, attempt: u32) -> Duration {
    Duration::from_secs(base_delay_seconds.saturating_mul(1u64 << (attempt - 1).min(62)))
}

/// Transcribe a single audio artifact via the remote service.
///
/// Retries transient failures up to `max_retries` attempts with
/// exponential backoff. An empty response is permanent and fails
/// immediately without retry or sleep. The artifact is re-read (and its
/// handle released) on every attempt.
pub async fn transcribe_unit<R: RemoteTranscriber + ?Sized>(
    remote: &R,
    path: &Path,
    max_retries: u32,
    base_delay_seconds: u64,
    params: &RemoteParams,
) -> Result<String> {
    let mut last_cause = "no attempts were made".to_string();

    for attempt in 1..=max_retries {
        // Read per attempt so no file handle outlives the call
        let audio = tokio::fs::read(path).await?;

        match classify(remote.transcribe(audio, params).await) {
            Attempt::Success(text) => return Ok(text),
            Attempt::Permanent(cause) => {
                return Err(ChunkscribeError::TranscriptionFailed { message: cause });
            }
            Attempt::Transient(cause) => {
                if attempt < max_retries {
                    let delay = backoff_delay(base_delay_seconds, attempt);
                    warn!(
                        "  Attempt {}/{} failed ({}), retrying in {}s...",
                        attempt,
                        max_retries,
                        cause,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                } else {
                    error!("  All {} attempts failed", max_retries);
                }
                last_cause = cause;
            }
        }
    }

    Err(ChunkscribeError::RetriesExhausted {
        attempts: max_retries,
        cause: last_cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockRemoteTranscriber;
    use std::path::PathBuf;

    fn artifact() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unit.wav");
        std::fs::write(&path, b"fake audio bytes").unwrap();
        (dir, path)
    }

    async fn run(mock: &MockRemoteTranscriber, path: &Path, max_retries: u32) -> Result<String> {
        // Zero base delay keeps retry tests fast
        transcribe_unit(mock, path, max_retries, 0, &RemoteParams::default()).await
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let (_dir, path) = artifact();
        let mock = MockRemoteTranscriber::new().with_response("it worked.");

        let text = run(&mock, &path, 3).await.unwrap();

        assert_eq!(text, "it worked.");
        assert_eq!(mock.attempts(), 1);
    }

    #[tokio::test]
    async fn fragments_concatenate_in_emission_order() {
        let (_dir, path) = artifact();
        let mock = MockRemoteTranscriber::new().then_fragments(&["Hello ", "out ", "there."]);

        let text = run(&mock, &path, 3).await.unwrap();

        assert_eq!(text, "Hello out there.");
    }

    #[tokio::test]
    async fn transient_failure_then_success_makes_two_attempts() {
        let (_dir, path) = artifact();
        let mock = MockRemoteTranscriber::new()
            .then_failure("connection reset")
            .then_fragments(&["recovered."]);

        let text = run(&mock, &path, 3).await.unwrap();

        assert_eq!(text, "recovered.");
        assert_eq!(mock.attempts(), 2);
    }

    #[tokio::test]
    async fn exhausted_retries_reports_attempt_count_and_cause() {
        let (_dir, path) = artifact();
        let mock = MockRemoteTranscriber::new()
            .then_failure("timeout")
            .then_failure("timeout")
            .then_failure("gateway error");

        let err = run(&mock, &path, 3).await.unwrap_err();

        assert_eq!(mock.attempts(), 3);
        match err {
            ChunkscribeError::RetriesExhausted { attempts, cause } => {
                assert_eq!(attempts, 3);
                assert_eq!(cause, "gateway error");
            }
            other => panic!("Expected RetriesExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn exhausted_retries_message_states_configured_count() {
        let (_dir, path) = artifact();
        let mock = MockRemoteTranscriber::new()
            .then_failure("x")
            .then_failure("x");

        let err = run(&mock, &path, 2).await.unwrap_err();

        assert!(err.to_string().contains("after 2 attempts"));
    }

    #[tokio::test]
    async fn empty_response_is_permanent_after_one_attempt() {
        let (_dir, path) = artifact();
        let mock = MockRemoteTranscriber::new().then_empty();

        let err = run(&mock, &path, 3).await.unwrap_err();

        // No retry, no backoff: exactly one call was made
        assert_eq!(mock.attempts(), 1);
        assert!(matches!(
            err,
            ChunkscribeError::TranscriptionFailed { .. }
        ));
    }

    #[tokio::test]
    async fn whitespace_only_response_is_permanent() {
        let (_dir, path) = artifact();
        let mock = MockRemoteTranscriber::new().then_fragments(&["  ", "\n\t "]);

        let err = run(&mock, &path, 3).await.unwrap_err();

        assert_eq!(mock.attempts(), 1);
        assert!(matches!(
            err,
            ChunkscribeError::TranscriptionFailed { .. }
        ));
    }

    #[tokio::test]
    async fn missing_artifact_is_io_error() {
        let mock = MockRemoteTranscriber::new();

        let err = run(&mock, Path::new("/nonexistent/unit.wav"), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, ChunkscribeError::Io(_)));
        assert_eq!(mock.attempts(), 0);
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff_delay(2, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(2, 3), Duration::from_secs(8));
    }

    #[test]
    fn backoff_saturates_instead_of_overflowing() {
        let delay = backoff_delay(u64::MAX, 40);
        assert_eq!(delay, Duration::from_secs(u64::MAX));
    }
}
