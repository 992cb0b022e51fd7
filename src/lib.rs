//! chunkscribe - long-recording transcription via a remote API
//!
//! Splits recordings that exceed the service's output budget into chunks
//! cut at natural pauses, transcribes each chunk with bounded retry, and
//! assembles the results.

// Error handling discipline: library code propagates, never panics
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod download;
pub mod error;
pub mod output;
pub mod remote;
pub mod split;
pub mod transcribe;

// Core data types
pub use audio::{AudioTrack, probe_duration_seconds};
pub use split::{Chunk, find_silence_near, split_audio};

// Remote service boundary
pub use remote::{
    CallError, HttpRemoteTranscriber, MockRemoteTranscriber, RemoteParams, RemoteTranscriber,
};

// Pipeline
pub use transcribe::{ChunkWarning, Transcript, TruncationWarning, transcribe};

// Error handling
pub use error::{ChunkscribeError, Result};

// Config
pub use config::{Config, RetryConfig, SplitConfig, TruncationConfig};

/// Build version string with optional git commit hash.
///
/// Returns `"0.3.1+abc1234"` when git hash is available, `"0.3.1"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
