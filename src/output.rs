//! Transcript persistence.
//!
//! Saves the assembled text plus a small JSON metadata sidecar under a
//! unique timestamped filename.

use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
struct TranscriptMetadata<'a> {
    source: &'a str,
    word_count: usize,
    timestamp: &'a str,
}

/// Generate a unique filename stem: `{prefix}_{timestamp}_{suffix}`.
///
/// The suffix guards against collisions when two runs start within the
/// same second.
pub fn generate_filename(prefix: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let suffix: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(4)
        .collect();
    format!("{}_{}_{}", prefix, timestamp, suffix)
}

/// Save transcription text and metadata. Returns the text file path.
pub fn save_transcript(text: &str, source: &str, transcripts_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(transcripts_dir)?;

    let stem = generate_filename("transcript");
    let text_path = transcripts_dir.join(format!("{}.txt", stem));
    let meta_path = transcripts_dir.join(format!("{}.json", stem));

    // Everything after "transcript_"
    let timestamp = stem.split_once('_').map(|(_, rest)| rest).unwrap_or(&stem);

    let metadata = TranscriptMetadata {
        source,
        word_count: text.split_whitespace().count(),
        timestamp,
    };

    let json = serde_json::to_string_pretty(&metadata)
        .map_err(|e| crate::error::ChunkscribeError::Io(e.into()))?;

    std::fs::write(&text_path, text)?;
    std::fs::write(&meta_path, json)?;

    info!("Saved: {}", text_path.display());
    Ok(text_path)
}
