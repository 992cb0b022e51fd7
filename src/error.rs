//! Error types for chunkscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkscribeError {
    // Audio errors
    #[error("Audio processing failed: {message}")]
    AudioProcessing { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // Transcription errors
    //
    // TranscriptionFailed is permanent: the service answered but produced
    // nothing usable, so retrying cannot help. RetriesExhausted wraps the
    // last transient cause after the retry budget is spent.
    #[error("Transcription failed: {message}")]
    TranscriptionFailed { message: String },

    #[error("Transcription failed after {attempts} attempts: {cause}")]
    RetriesExhausted { attempts: u32, cause: String },

    // Download errors
    #[error("Download failed: {message}")]
    Download { message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ChunkscribeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_audio_processing_display() {
        let error = ChunkscribeError::AudioProcessing {
            message: "unsupported codec".to_string(),
        };
        assert_eq!(error.to_string(), "Audio processing failed: unsupported codec");
    }

    #[test]
    fn test_file_not_found_display() {
        let error = ChunkscribeError::FileNotFound {
            path: "/tmp/missing.wav".to_string(),
        };
        assert_eq!(error.to_string(), "File not found: /tmp/missing.wav");
    }

    #[test]
    fn test_transcription_failed_display() {
        let error = ChunkscribeError::TranscriptionFailed {
            message: "service returned empty transcription".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription failed: service returned empty transcription"
        );
    }

    #[test]
    fn test_retries_exhausted_reports_attempt_count() {
        let error = ChunkscribeError::RetriesExhausted {
            attempts: 3,
            cause: "connection reset".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription failed after 3 attempts: connection reset"
        );
    }

    #[test]
    fn test_download_display() {
        let error = ChunkscribeError::Download {
            message: "status 404".to_string(),
        };
        assert_eq!(error.to_string(), "Download failed: status 404");
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = ChunkscribeError::ConfigInvalidValue {
            key: "split.max_chunk_seconds".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for split.max_chunk_seconds: must be positive"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: ChunkscribeError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: ChunkscribeError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: ChunkscribeError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ChunkscribeError>();
        assert_sync::<ChunkscribeError>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
