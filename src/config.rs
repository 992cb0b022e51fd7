use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
///
/// Built once by the caller assembling the pipeline and passed by reference
/// into each component; nothing reads configuration from globals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub split: SplitConfig,
    pub retry: RetryConfig,
    pub truncation: TruncationConfig,
    pub remote: RemoteConfig,
    pub output: OutputConfig,
}

/// Chunk splitting and silence search configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    /// Maximum chunk duration in seconds.
    pub max_chunk_seconds: u32,
    /// Window (seconds) around each target split point to search for silence.
    pub split_window_seconds: u32,
    /// Minimum silence length (ms) to qualify as a split point.
    pub min_silence_ms: u32,
    /// dBFS threshold below which audio counts as silence.
    pub silence_threshold_db: f32,
    /// Directory for intermediate chunk artifacts.
    pub temp_dir: PathBuf,
}

/// Retry behaviour for remote transcription calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per unit.
    pub max_retries: u32,
    /// Base delay in seconds; doubles each attempt.
    pub base_delay_seconds: u64,
}

/// Truncation heuristic configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TruncationConfig {
    /// Warn when actual words fall below this fraction of the estimate.
    pub warn_ratio: f64,
    /// Assumed speaking rate used for the word-count estimate.
    pub expected_words_per_second: f64,
}

/// Remote transcription service configuration.
///
/// The API token is deliberately not part of the file format; it comes
/// from the environment only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the OpenAI-compatible transcription API.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Sampling temperature sent with each request.
    pub temperature: f64,
}

/// Transcript output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where transcripts and their metadata are written.
    pub transcripts_dir: PathBuf,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_chunk_seconds: defaults::MAX_CHUNK_SECONDS,
            split_window_seconds: defaults::SPLIT_WINDOW_SECONDS,
            min_silence_ms: defaults::MIN_SILENCE_MS,
            silence_threshold_db: defaults::SILENCE_THRESHOLD_DB,
            temp_dir: PathBuf::from(defaults::TEMP_DIR),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::MAX_RETRIES,
            base_delay_seconds: defaults::RETRY_BASE_DELAY_SECS,
        }
    }
}

impl Default for TruncationConfig {
    fn default() -> Self {
        Self {
            warn_ratio: defaults::TRUNCATION_WARN_RATIO,
            expected_words_per_second: defaults::EXPECTED_WORDS_PER_SECOND,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_API_BASE.to_string(),
            model: defaults::DEFAULT_MODEL.to_string(),
            temperature: defaults::TRANSCRIPTION_TEMPERATURE,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            transcripts_dir: PathBuf::from(defaults::TRANSCRIPTS_DIR),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported environment variables:
    /// - CHUNKSCRIBE_MODEL → remote.model
    /// - CHUNKSCRIBE_API_BASE → remote.base_url
    /// - CHUNKSCRIBE_MAX_CHUNK_SECONDS → split.max_chunk_seconds
    /// - CHUNKSCRIBE_TEMP_DIR → split.temp_dir
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("CHUNKSCRIBE_MODEL")
            && !model.is_empty()
        {
            self.remote.model = model;
        }

        if let Ok(base) = std::env::var("CHUNKSCRIBE_API_BASE")
            && !base.is_empty()
        {
            self.remote.base_url = base;
        }

        if let Ok(secs) = std::env::var("CHUNKSCRIBE_MAX_CHUNK_SECONDS")
            && let Ok(parsed) = secs.parse::<u32>()
            && parsed > 0
        {
            self.split.max_chunk_seconds = parsed;
        }

        if let Ok(dir) = std::env::var("CHUNKSCRIBE_TEMP_DIR")
            && !dir.is_empty()
        {
            self.split.temp_dir = PathBuf::from(dir);
        }

        self
    }

    /// Validate values that the pipeline cannot work with.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.split.max_chunk_seconds == 0 {
            return Err(crate::error::ChunkscribeError::ConfigInvalidValue {
                key: "split.max_chunk_seconds".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.retry.max_retries == 0 {
            return Err(crate::error::ChunkscribeError::ConfigInvalidValue {
                key: "retry.max_retries".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
