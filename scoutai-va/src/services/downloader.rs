//! Video download to scoped temporary storage
//!
//! Fetches a client-supplied clip URL into a uuid-named file under the
//! configured temp directory. The returned `TempClip` guard removes the
//! file when dropped, so cleanup happens on every exit path, including
//! failures partway through analysis.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Download errors
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Request could not be sent or the transfer failed
    #[error("Failed to download video: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Failed to download video: HTTP {0}")]
    Status(u16),

    /// Downloaded bytes could not be written to disk
    #[error("Failed to store video: {0}")]
    Io(#[from] std::io::Error),
}

/// Scoped temp file holding one downloaded clip
#[derive(Debug)]
pub struct TempClip {
    path: PathBuf,
}

impl TempClip {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempClip {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Video downloader with a shared HTTP client
#[derive(Debug, Clone)]
pub struct VideoDownloader {
    client: reqwest::Client,
    temp_dir: PathBuf,
}

impl VideoDownloader {
    pub fn new(temp_dir: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            temp_dir,
        }
    }

    /// Fetch a clip URL into a scoped temp file
    pub async fn fetch(&self, url: &str) -> Result<TempClip, DownloadError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status().as_u16()));
        }
        let bytes = response.bytes().await?;

        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let path = self.temp_dir.join(format!("{}.mp4", Uuid::new_v4()));
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(
            url,
            path = %path.display(),
            bytes = bytes.len(),
            "Video downloaded"
        );

        Ok(TempClip::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_clip_removes_file_on_drop() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("{}.mp4", Uuid::new_v4()));
        std::fs::write(&path, b"clip bytes").unwrap();
        assert!(path.exists());

        let clip = TempClip::new(path.clone());
        assert_eq!(clip.path(), path.as_path());
        drop(clip);
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_clip_drop_tolerates_missing_file() {
        let path = std::env::temp_dir().join(format!("{}.mp4", Uuid::new_v4()));
        let clip = TempClip::new(path);
        // File was never created; drop must not panic
        drop(clip);
    }
}
