//! Truncation heuristic.
//!
//! Advisory post-hoc checks flagging transcriptions that look cut short.
//! Warnings never abort processing; they are attached to the result for
//! the caller to surface.

use crate::config::TruncationConfig;
use crate::defaults;
use std::fmt;

/// A single advisory warning about a possibly truncated transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TruncationWarning {
    /// Word count fell below the configured fraction of the estimate for
    /// the unit's duration.
    LowWordCount { words: usize, expected: usize },
    /// The text does not end in sentence-terminal punctuation.
    MissingTerminalPunctuation,
}

impl fmt::Display for TruncationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationWarning::LowWordCount { words, expected } => write!(
                f,
                "possible truncation: got {} words, expected ~{}",
                words, expected
            ),
            TruncationWarning::MissingTerminalPunctuation => write!(
                f,
                "possible truncation: text ends without terminal punctuation"
            ),
        }
    }
}

/// Check a transcription against the expected word count and sentence
/// termination for its duration.
///
/// The two checks are independent; both, either, or neither may fire.
pub fn check_truncation(
    text: &str,
    duration_seconds: f64,
    config: &TruncationConfig,
) -> Vec<TruncationWarning> {
    let mut warnings = Vec::new();

    let words = text.split_whitespace().count();
    let expected = duration_seconds * config.expected_words_per_second;
    let ratio = if expected > 0.0 {
        words as f64 / expected
    } else {
        1.0
    };

    if ratio < config.warn_ratio {
        warnings.push(TruncationWarning::LowWordCount {
            words,
            expected: expected as usize,
        });
    }

    let stripped = text.trim_end();
    if let Some(last) = stripped.chars().last()
        && !defaults::TERMINAL_PUNCTUATION.contains(&last)
    {
        warnings.push(TruncationWarning::MissingTerminalPunctuation);
    }

    warnings
}
