
use crate::config::{
    CaptureConfig, Config, LocationConfig, PermissionsConfig, PlatformConfig, StorageConfig,
};

use std::path::{Path, PathBuf};

/// Configuration rooted entirely inside `root`.
pub(crate) fn config_in(root: &Path) -> Config {
    Config {
        capture: CaptureConfig::default(),
        storage: StorageConfig {
            cache_dir: root.join("cache"),
            public_video_dir: root.join("public"),
            gallery_dir: None,
        },
        platform: PlatformConfig::default(),
        permissions: PermissionsConfig::default(),
        location: LocationConfig {
            latitude: Some(59.9139),
            longitude: Some(10.7522),
            address: Some("Karl Johans gate 1, Oslo".to_string()),
        },
    }
}

/// Write a small stand-in clip and return its path.
#[allow(clippy::unwrap_used)]
pub(crate) fn write_clip(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, bytes).unwrap();
    path
}

/// File names in `dir`, sorted; empty when `dir` does not exist.
pub(crate) fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
