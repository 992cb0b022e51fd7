//! Command-line interface for chunkscribe
//!
//! Provides argument parsing using clap derive macros.

use clap::Parser;
use std::path::PathBuf;

/// Transcribe long recordings via a remote speech-to-text API
#[derive(Parser, Debug)]
#[command(
    name = "chunkscribe",
    version,
    about = "Transcribe audio URLs or local audio files, splitting long recordings at natural pauses"
)]
pub struct Cli {
    /// Audio source: local file path or direct audio URL
    pub source: String,

    /// Directory for transcript output
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Max chunk duration in seconds
    #[arg(long, value_name = "SECONDS")]
    pub max_chunk: Option<u32>,

    /// Remote model identifier
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_only() {
        let cli = Cli::parse_from(["chunkscribe", "talk.wav"]);

        assert_eq!(cli.source, "talk.wav");
        assert!(cli.output_dir.is_none());
        assert!(cli.max_chunk.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from([
            "chunkscribe",
            "https://example.com/talk.wav",
            "-o",
            "out",
            "--max-chunk",
            "120",
            "--model",
            "whisper-1",
            "--verbose",
        ]);

        assert_eq!(cli.source, "https://example.com/talk.wav");
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.max_chunk, Some(120));
        assert_eq!(cli.model.as_deref(), Some("whisper-1"));
        assert!(cli.verbose);
    }

    #[test]
    fn source_is_required() {
        assert!(Cli::try_parse_from(["chunkscribe"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["chunkscribe", "talk.wav", "-v", "-q"]).is_err());
    }
}
