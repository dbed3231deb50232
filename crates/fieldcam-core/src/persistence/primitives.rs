use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

/// Error type returned by platform primitives.
pub type PrimitiveError = Box<dyn std::error::Error + Send + Sync>;

/// Platform "save to shared media gallery" operation.
#[async_trait]
pub trait MediaGallery: Send + Sync {
    /// Import the video at `path` into the gallery.
    ///
    /// Returns the gallery's identifier for the new entry (URI or path).
    async fn save_video(&self, path: &Path) -> Result<String, PrimitiveError>;
}

/// Filesystem operations used by the fallback copy and raw reclaim.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Create `dir` and its parents when missing.
    async fn ensure_dir(&self, dir: &Path) -> std::io::Result<()>;

    /// Copy `src` into a newly created `dest`, returning the number of bytes
    /// written.
    ///
    /// Fails with [`std::io::ErrorKind::AlreadyExists`] when `dest` is
    /// present, leaving it untouched.
    async fn copy(&self, src: &Path, dest: &Path) -> std::io::Result<u64>;

    /// Absolute path of `path` with links and `.` components resolved.
    async fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf>;

    /// Delete the file at `path`.
    async fn remove(&self, path: &Path) -> std::io::Result<()>;
}

/// [`FileStore`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileStore;

#[async_trait]
impl FileStore for TokioFileStore {
    async fn ensure_dir(&self, dir: &Path) -> std::io::Result<()> {
        fs::create_dir_all(dir).await
    }

    async fn copy(&self, src: &Path, dest: &Path) -> std::io::Result<u64> {
        let mut reader = fs::File::open(src).await?;
        let mut writer = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dest)
            .await?;

        let copied = match tokio::io::copy(&mut reader, &mut writer).await {
            Ok(copied) => copied,
            Err(e) => {
                drop(writer);
                let _ = fs::remove_file(dest).await;
                return Err(e);
            }
        };
        writer.flush().await?;

        Ok(copied)
    }

    async fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf> {
        fs::canonicalize(path).await
    }

    async fn remove(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_file(path).await
    }
}
