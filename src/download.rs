//! Audio source resolution.
//!
//! A source string is either a local file path or a direct HTTP(S) audio
//! URL, which gets streamed into the temp directory. YouTube links are
//! recognized and rejected with a pointer to external tooling.

use crate::error::{ChunkscribeError, Result};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// A source resolved to a readable local file.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub path: PathBuf,
    /// True when the file was downloaded and should be removed afterwards.
    pub temporary: bool,
}

/// Check if a string is an HTTP/HTTPS URL.
pub fn is_remote_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Check if a URL points at YouTube.
pub fn is_youtube_url(source: &str) -> bool {
    if !is_remote_url(source) {
        return false;
    }

    let after_scheme = source.split("://").nth(1).unwrap_or("");
    let host = after_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    ["youtube.com", "www.youtube.com", "youtu.be"]
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
}

/// Derive a destination filename from a URL, defaulting the extension.
fn filename_from_url(url: &str) -> String {
    let trimmed = url.split(['?', '#']).next().unwrap_or(url);
    let name = trimmed.rsplit('/').next().unwrap_or("");

    let mut filename = if name.is_empty() || is_remote_url(name) {
        "audio_download".to_string()
    } else {
        name.to_string()
    };

    if !filename.contains('.') {
        filename.push_str(".wav");
    }
    filename
}

/// Download an audio file from a direct HTTP(S) URL.
///
/// Streams the body to `temp_dir` and returns the local path.
pub async fn download_from_url(url: &str, temp_dir: &Path) -> Result<PathBuf> {
    info!("Downloading audio from URL...");
    std::fs::create_dir_all(temp_dir)?;

    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ChunkscribeError::Download {
            message: format!("URL download failed: {}", e),
        })?;

    // Quick sanity check on content-type
    if let Some(ct) = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        && !ct.contains("audio")
        && !ct.contains("octet-stream")
    {
        warn!("URL content-type is '{}', may not be an audio file", ct);
    }

    let dest = temp_dir.join(filename_from_url(url));
    let mut file = tokio::fs::File::create(&dest).await?;

    let mut stream = response.bytes_stream();
    while let Some(piece) = stream.next().await {
        let bytes = piece.map_err(|e| ChunkscribeError::Download {
            message: format!("URL download failed: {}", e),
        })?;
        file.write_all(&bytes).await?;
    }
    file.flush().await?;

    info!("Downloaded: {}", dest.display());
    Ok(dest)
}

/// Resolve a source string to a local audio file.
pub async fn resolve_source(source: &str, temp_dir: &Path) -> Result<ResolvedSource> {
    if is_youtube_url(source) {
        return Err(ChunkscribeError::Download {
            message: "YouTube sources are not supported; download the audio first \
                      (e.g. with yt-dlp) and pass the local file"
                .to_string(),
        });
    }

    if is_remote_url(source) {
        let path = download_from_url(source, temp_dir).await?;
        return Ok(ResolvedSource {
            path,
            temporary: true,
        });
    }

    // Assume local file path
    let path = PathBuf::from(source);
    if !path.is_file() {
        return Err(ChunkscribeError::FileNotFound {
            path: source.to_string(),
        });
    }
    debug!("Using local file: {}", path.display());
    Ok(ResolvedSource {
        path,
        temporary: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_remote_urls() {
        assert!(is_remote_url("https://example.com/talk.wav"));
        assert!(is_remote_url("http://example.com/talk.wav"));
        assert!(!is_remote_url("/home/user/talk.wav"));
        assert!(!is_remote_url("talk.wav"));
        assert!(!is_remote_url("ftp://example.com/talk.wav"));
    }

    #[test]
    fn detects_youtube_urls() {
        assert!(is_youtube_url("https://www.youtube.com/watch?v=abc123"));
        assert!(is_youtube_url("https://youtube.com/watch?v=abc123"));
        assert!(is_youtube_url("https://youtu.be/abc123"));
        assert!(is_youtube_url("https://m.youtube.com/watch?v=abc123"));

        assert!(!is_youtube_url("https://example.com/youtube.com.wav"));
        assert!(!is_youtube_url("https://notyoutube.community/v"));
        assert!(!is_youtube_url("/local/youtube.com"));
    }

    #[test]
    fn filename_derived_from_url_path() {
        assert_eq!(
            filename_from_url("https://example.com/media/talk.mp3"),
            "talk.mp3"
        );
        assert_eq!(
            filename_from_url("https://example.com/media/talk.wav?sig=xyz#t=0"),
            "talk.wav"
        );
    }

    #[test]
    fn filename_defaults_when_url_has_no_name() {
        assert_eq!(filename_from_url("https://example.com/"), "audio_download.wav");
        assert_eq!(filename_from_url("https://example.com/talk"), "talk.wav");
    }

    #[tokio::test]
    async fn resolve_rejects_youtube() {
        let dir = tempfile::tempdir().unwrap();

        let err = resolve_source("https://youtu.be/abc123", dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, ChunkscribeError::Download { .. }));
        assert!(err.to_string().contains("yt-dlp"));
    }

    #[tokio::test]
    async fn resolve_missing_local_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = resolve_source("/nonexistent/talk.wav", dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, ChunkscribeError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn resolve_local_file_is_not_temporary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.wav");
        std::fs::write(&path, b"data").unwrap();

        let resolved = resolve_source(path.to_str().unwrap(), dir.path())
            .await
            .unwrap();

        assert_eq!(resolved.path, path);
        assert!(!resolved.temporary);
    }
}
