//! Top-level transcription pipeline.
//!
//! Measures the recording; short files go straight to the remote service,
//! long ones are split at natural pauses and transcribed chunk by chunk,
//! strictly in order. Results are joined with a blank line. Chunk
//! artifacts are deleted on every exit path, success or failure.

pub mod orchestrator;
pub mod truncation;

use crate::audio::{AudioTrack, probe_duration_seconds};
use crate::config::Config;
use crate::defaults;
use crate::error::Result;
use crate::remote::{RemoteParams, RemoteTranscriber};
use crate::split::{Chunk, split_audio};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use truncation::{TruncationWarning, check_truncation};

/// A truncation warning attributed to the chunk that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkWarning {
    pub chunk_index: usize,
    pub warning: TruncationWarning,
}

/// Assembled transcription of a whole recording.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Full text, chunks joined with a blank line.
    pub text: String,
    /// Advisory warnings, in chunk order.
    pub warnings: Vec<ChunkWarning>,
}

/// Owns chunk artifacts and deletes them on drop.
///
/// Whoever creates an artifact is responsible for its deletion exactly
/// once; this guard carries that responsibility through every exit path,
/// early errors and cancellation included. Removal failures are logged
/// and swallowed.
struct ChunkArtifacts {
    paths: Vec<PathBuf>,
}

impl ChunkArtifacts {
    fn new(chunks: &[Chunk]) -> Self {
        Self {
            paths: chunks.iter().map(|c| c.path.clone()).collect(),
        }
    }
}

impl Drop for ChunkArtifacts {
    fn drop(&mut self) {
        for path in &self.paths {
            if path.exists()
                && let Err(e) = std::fs::remove_file(path)
            {
                debug!("Failed to remove temp file {}: {}", path.display(), e);
            }
        }
    }
}

fn surface_warnings(chunk_index: usize, warnings: &[TruncationWarning]) {
    for warning in warnings {
        warn!("  Chunk {}: {}", chunk_index + 1, warning);
    }
}

fn attribute(chunk_index: usize, warnings: Vec<TruncationWarning>) -> Vec<ChunkWarning> {
    warnings
        .into_iter()
        .map(|warning| ChunkWarning {
            chunk_index,
            warning,
        })
        .collect()
}

/// Transcribe an audio file, splitting into chunks if needed.
///
/// All-or-nothing: any unit's permanent or exhausted-retry failure fails
/// the whole operation and discards earlier results. Chunk artifacts are
/// removed before this returns, on both paths.
pub async fn transcribe<R: RemoteTranscriber + ?Sized>(
    remote: &R,
    audio_path: &Path,
    config: &Config,
) -> Result<Transcript> {
    config.validate()?;
    let params = RemoteParams::from(&config.remote);

    let duration = probe_duration_seconds(audio_path)?;
    info!("Duration: {:.0}s ({:.1} min)", duration, duration / 60.0);

    // Short file: transcribe directly, no splitting
    if duration <= config.split.max_chunk_seconds as f64 {
        info!("Transcribing...");
        let text = orchestrator::transcribe_unit(
            remote,
            audio_path,
            config.retry.max_retries,
            config.retry.base_delay_seconds,
            &params,
        )
        .await?;

        let warnings = check_truncation(&text, duration, &config.truncation);
        surface_warnings(0, &warnings);

        return Ok(Transcript {
            text,
            warnings: attribute(0, warnings),
        });
    }

    // Long file: split at pauses and transcribe each chunk in order
    let track = AudioTrack::load(audio_path)?;
    let chunks = split_audio(&track, audio_path, &config.split.temp_dir, &config.split)?;
    let _artifacts = ChunkArtifacts::new(&chunks);

    let mut texts = Vec::with_capacity(chunks.len());
    let mut all_warnings = Vec::new();

    for chunk in &chunks {
        info!("Transcribing chunk {}/{}...", chunk.index + 1, chunks.len());

        let text = orchestrator::transcribe_unit(
            remote,
            &chunk.path,
            config.retry.max_retries,
            config.retry.base_delay_seconds,
            &params,
        )
        .await?;

        let warnings = check_truncation(&text, chunk.duration_seconds(), &config.truncation);
        surface_warnings(chunk.index, &warnings);
        all_warnings.extend(attribute(chunk.index, warnings));

        texts.push(text);
    }

    Ok(Transcript {
        text: texts.join(defaults::CHUNK_JOIN_SEPARATOR),
        warnings: all_warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_artifacts_removes_files_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a_chunk_000.wav");
        let b = dir.path().join("a_chunk_001.wav");
        std::fs::write(&a, b"x").unwrap();
        std::fs::write(&b, b"y").unwrap();

        let chunks = vec![
            Chunk {
                index: 0,
                start_ms: 0,
                end_ms: 1000,
                path: a.clone(),
            },
            Chunk {
                index: 1,
                start_ms: 1000,
                end_ms: 2000,
                path: b.clone(),
            },
        ];

        drop(ChunkArtifacts::new(&chunks));

        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn chunk_artifacts_tolerates_already_removed_files() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("never_created.wav");

        let chunks = vec![Chunk {
            index: 0,
            start_ms: 0,
            end_ms: 1000,
            path: gone,
        }];

        // Must not panic
        drop(ChunkArtifacts::new(&chunks));
    }

    #[test]
    fn attribute_tags_each_warning_with_the_chunk() {
        let warnings = vec![
            TruncationWarning::LowWordCount {
                words: 1,
                expected: 10,
            },
            TruncationWarning::MissingTerminalPunctuation,
        ];

        let tagged = attribute(4, warnings);

        assert_eq!(tagged.len(), 2);
        assert!(tagged.iter().all(|w| w.chunk_index == 4));
    }
}
