//! Duration probing without a full decode.

use crate::error::{ChunkscribeError, Result};
use std::path::Path;

/// Measure the duration of a WAV file in seconds.
///
/// Reads only the header, so probing a multi-hour recording is cheap.
/// Fails with an audio processing error if the file is missing, corrupt,
/// or not a WAV.
pub fn probe_duration_seconds(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path).map_err(|e| ChunkscribeError::AudioProcessing {
        message: format!("Failed to read audio file {}: {}", path.display(), e),
    })?;

    let spec = reader.spec();
    Ok(reader.duration() as f64 / spec.sample_rate as f64)
}
