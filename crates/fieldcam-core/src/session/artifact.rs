use std::path::PathBuf;

use serde::Serialize;

/// File produced by the capture device.
///
/// Owned by the session until compression succeeds, after which the
/// controller reclaims the underlying file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawArtifact {
    /// Location of the captured file.
    pub path: PathBuf,
    /// Recording length in milliseconds.
    pub duration_ms: u64,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// File produced by the compression engine.
///
/// Never deleted by the pipeline, so a failed save can be retried by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressedArtifact {
    /// Location of the compressed file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl CompressedArtifact {
    /// Size in mebibytes, as shown to the user.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}
