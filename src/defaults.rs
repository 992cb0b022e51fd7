//! Default configuration constants for chunkscribe.
//!
//! This module provides shared constants used across the configuration types
//! to ensure consistency and eliminate duplication.

/// Default maximum chunk duration in seconds.
///
/// 5-minute chunks keep each transcription response well within the remote
/// service's ~2000 token output limit, even for fast speakers
/// (~200 wpm is ~1000 words in 5 minutes).
pub const MAX_CHUNK_SECONDS: u32 = 300;

/// Default window (in seconds) around a target split point to search for silence.
pub const SPLIT_WINDOW_SECONDS: u32 = 30;

/// Default dBFS threshold below which audio counts as silence.
pub const SILENCE_THRESHOLD_DB: f32 = -40.0;

/// Default minimum silence length (ms) to qualify as a split point.
pub const MIN_SILENCE_MS: u32 = 400;

/// Frame size (ms) for the RMS level analysis used by silence detection.
///
/// 10ms frames give enough resolution to respect `MIN_SILENCE_MS` while
/// keeping the analysis cheap on multi-hour recordings.
pub const SILENCE_FRAME_MS: u32 = 10;

/// Default directory for intermediate chunk artifacts.
pub const TEMP_DIR: &str = "temp";

/// Default directory for saved transcripts.
pub const TRANSCRIPTS_DIR: &str = "transcripts";

/// Default remote transcription model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-transcribe";

/// Default base URL of the transcription API.
///
/// Any endpoint speaking the OpenAI-compatible `/audio/transcriptions`
/// protocol works here, including self-hosted gateways.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default transcription sampling temperature.
///
/// 0 keeps output deterministic; transcription gains nothing from sampling.
pub const TRANSCRIPTION_TEMPERATURE: f64 = 0.0;

/// Default maximum number of remote call attempts per unit.
pub const MAX_RETRIES: u32 = 3;

/// Default base delay (seconds) between retries.
///
/// Doubles each attempt: 2s, 4s, 8s for three attempts.
pub const RETRY_BASE_DELAY_SECS: u64 = 2;

/// Default word-count ratio below which a transcription is flagged
/// as possibly truncated.
pub const TRUNCATION_WARN_RATIO: f64 = 0.5;

/// Assumed average speaking rate (words per second) for truncation estimates.
pub const EXPECTED_WORDS_PER_SECOND: f64 = 2.5;

/// Separator placed between chunk transcriptions in the assembled text.
pub const CHUNK_JOIN_SEPARATOR: &str = "\n\n";

/// Characters accepted as sentence-terminal punctuation by the
/// truncation heuristic.
pub const TERMINAL_PUNCTUATION: [char; 5] = ['.', '?', '!', '"', '\''];
