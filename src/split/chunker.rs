//! Chunk splitter.
//!
//! Walks the timeline cutting near every `max_chunk_seconds` boundary,
//! preferring a nearby pause and falling back to a hard cut. Each chunk is
//! exported as a standalone WAV artifact so it can be transmitted
//! independently. The caller owns the artifacts' lifecycle.

use crate::audio::AudioTrack;
use crate::config::SplitConfig;
use crate::error::Result;
use crate::split::silence::find_silence_near;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A contiguous slice of the source audio, materialized on disk.
///
/// Invariant across a split: chunks are contiguous and non-overlapping,
/// `chunk[i].end_ms == chunk[i+1].start_ms`, and together they cover the
/// whole track.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub path: PathBuf,
}

impl Chunk {
    pub fn duration_seconds(&self) -> f64 {
        (self.end_ms - self.start_ms) as f64 / 1000.0
    }
}

/// Split a track into chunk artifacts under `temp_dir`.
///
/// Cut points come from [`find_silence_near`] when a qualifying pause
/// exists near the target boundary, otherwise the cut lands exactly on the
/// target (hard cut). The final remainder always becomes the last chunk.
/// Artifacts are named `{stem}_chunk_{index:03}.wav`.
pub fn split_audio(
    track: &AudioTrack,
    source_path: &Path,
    temp_dir: &Path,
    config: &SplitConfig,
) -> Result<Vec<Chunk>> {
    std::fs::create_dir_all(temp_dir)?;

    let total_ms = track.duration_ms();
    let chunk_target_ms = config.max_chunk_seconds as u64 * 1000;
    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());

    info!(
        "Splitting audio into ~{}s chunks...",
        config.max_chunk_seconds
    );

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut pos = 0u64;
    let mut index = 0usize;

    while pos < total_ms {
        let last = total_ms - pos <= chunk_target_ms;
        let end = if last {
            total_ms
        } else {
            let target = pos + chunk_target_ms;
            // A search window wider than the chunk length can reach behind
            // the current position; only a candidate ahead of it can
            // advance the walk.
            match find_silence_near(track, target, config) {
                Some(silence_point) if silence_point > pos => {
                    debug!(
                        "  Chunk {}: splitting at silence {:.1}s (target was {:.1}s)",
                        index + 1,
                        silence_point as f64 / 1000.0,
                        target as f64 / 1000.0,
                    );
                    silence_point
                }
                _ => {
                    debug!(
                        "  Chunk {}: no usable silence, hard split at {:.1}s",
                        index + 1,
                        target as f64 / 1000.0,
                    );
                    target
                }
            }
        };

        // The last chunk slices to the final sample so a sub-millisecond
        // remainder is never dropped.
        let piece = if last {
            track.slice_to_end(pos)
        } else {
            track.slice(pos, end)
        };

        let path = temp_dir.join(format!("{}_chunk_{:03}.wav", stem, index));
        if let Err(e) = piece.export(&path) {
            // Leave no partial artifact set behind
            for stale in chunks.iter().map(|c| c.path.as_path()).chain([path.as_path()]) {
                if stale.exists()
                    && let Err(remove_err) = std::fs::remove_file(stale)
                {
                    debug!(
                        "Failed to remove temp file {}: {}",
                        stale.display(),
                        remove_err
                    );
                }
            }
            return Err(e);
        }

        info!(
            "  Chunk {}: {:.1}s - {:.1}s ({:.1}s)",
            index + 1,
            pos as f64 / 1000.0,
            end as f64 / 1000.0,
            (end - pos) as f64 / 1000.0,
        );

        chunks.push(Chunk {
            index,
            start_ms: pos,
            end_ms: end,
            path,
        });

        pos = end;
        index += 1;
    }

    info!("Created {} chunks", chunks.len());
    Ok(chunks)
}
