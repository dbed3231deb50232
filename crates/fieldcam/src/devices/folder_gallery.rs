use fieldcam_core::{MediaGallery, PrimitiveError};

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

/// Media gallery backed by a plain folder.
///
/// Without a folder the host has no gallery and every save fails, which
/// sends the resolver to its public-directory fallback.
pub struct FolderGallery {
    dir: Option<PathBuf>,
}

impl FolderGallery {
    pub(crate) fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl MediaGallery for FolderGallery {
    #[instrument(skip(self))]
    async fn save_video(&self, path: &Path) -> Result<String, PrimitiveError> {
        let dir = self
            .dir
            .as_ref()
            .ok_or("No media gallery configured on this host")?;

        let file_name = path
            .file_name()
            .ok_or_else(|| format!("Not a file: {}", path.display()))?;

        tokio::fs::create_dir_all(dir).await?;
        let dest = dir.join(file_name);
        tokio::fs::copy(path, &dest).await?;

        debug!(dest = ?dest, "Imported into gallery");

        Ok(dest.display().to_string())
    }
}
