use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where artifacts live at each pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// App-private cache for raw captures and compressed output.
    pub cache_dir: PathBuf,

    /// Public video directory used by the fallback copy.
    pub public_video_dir: PathBuf,

    /// Folder acting as the media gallery (None = no gallery on this host).
    #[serde(default)]
    pub gallery_dir: Option<PathBuf>,
}
