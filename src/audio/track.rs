//! Decoded audio track.
//!
//! An [`AudioTrack`] holds mono 16-bit samples plus the sample rate, loaded
//! once per operation. Tracks are never mutated; chunking produces new
//! tracks via [`AudioTrack::slice`].

use crate::error::{ChunkscribeError, Result};
use std::path::Path;

/// Immutable handle to decoded audio samples.
///
/// Stereo input is downmixed to mono on load. Sample positions are
/// addressed in milliseconds; conversions round down, so two adjacent
/// slices sharing a boundary cover the underlying samples exactly once.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioTrack {
    /// Load a WAV file into memory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader =
            hound::WavReader::open(path).map_err(|e| ChunkscribeError::AudioProcessing {
                message: format!("Failed to read audio file {}: {}", path.display(), e),
            })?;

        let spec = reader.spec();
        if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(ChunkscribeError::AudioProcessing {
                message: format!(
                    "Unsupported sample format in {}: expected 16-bit PCM",
                    path.display()
                ),
            });
        }

        let raw_samples: Vec<i16> = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ChunkscribeError::AudioProcessing {
                message: format!("Failed to decode samples from {}: {}", path.display(), e),
            })?;

        // Downmix to mono if stereo
        let samples = if spec.channels == 2 {
            raw_samples
                .chunks_exact(2)
                .map(|pair| {
                    let left = pair[0] as i32;
                    let right = pair[1] as i32;
                    ((left + right) / 2) as i16
                })
                .collect()
        } else if spec.channels == 1 {
            raw_samples
        } else {
            return Err(ChunkscribeError::AudioProcessing {
                message: format!(
                    "Unsupported channel count {} in {}",
                    spec.channels,
                    path.display()
                ),
            });
        };

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    /// Create a track from raw mono samples.
    pub fn from_samples(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Total duration in whole milliseconds (rounded down).
    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Total duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Convert a millisecond position to a sample index, clamped to the
    /// track length.
    pub(crate) fn sample_at(&self, ms: u64) -> usize {
        let idx = (ms * self.sample_rate as u64 / 1000) as usize;
        idx.min(self.samples.len())
    }

    /// Extract the half-open interval `[start_ms, end_ms)` as a new track.
    ///
    /// Boundaries are converted to sample indices with the same rounding,
    /// so `slice(a, b)` and `slice(b, c)` together cover `[a, c)` with no
    /// sample lost or duplicated.
    pub fn slice(&self, start_ms: u64, end_ms: u64) -> AudioTrack {
        let start = self.sample_at(start_ms);
        let end = self.sample_at(end_ms).max(start);
        AudioTrack {
            samples: self.samples[start..end].to_vec(),
            sample_rate: self.sample_rate,
        }
    }

    /// Extract `[start_ms, end-of-track)` as a new track.
    ///
    /// Unlike [`AudioTrack::slice`], the end is the final sample rather than
    /// a millisecond position, so a trailing sub-millisecond remainder is
    /// included. The last chunk of a split uses this to keep the sample
    /// union exact.
    pub fn slice_to_end(&self, start_ms: u64) -> AudioTrack {
        let start = self.sample_at(start_ms);
        AudioTrack {
            samples: self.samples[start..].to_vec(),
            sample_rate: self.sample_rate,
        }
    }

    /// Write the track to a 16-bit mono WAV file.
    pub fn export(&self, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer =
            hound::WavWriter::create(path, spec).map_err(|e| ChunkscribeError::AudioProcessing {
                message: format!("Failed to create {}: {}", path.display(), e),
            })?;

        for &sample in &self.samples {
            writer
                .write_sample(sample)
                .map_err(|e| ChunkscribeError::AudioProcessing {
                    message: format!("Failed to write {}: {}", path.display(), e),
                })?;
        }

        writer
            .finalize()
            .map_err(|e| ChunkscribeError::AudioProcessing {
                message: format!("Failed to finalize {}: {}", path.display(), e),
            })
    }
}
