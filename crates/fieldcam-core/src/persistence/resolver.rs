use crate::{
    CoreResult, SessionError,
    persistence::{FileStore, MediaGallery, PlatformContext, SaveStrategy},
    session::{CompressedArtifact, QualityProfile},
};

use std::{io::ErrorKind, panic::Location, path::Path, sync::Arc};

use chrono::Utc;
use error_location::ErrorLocation;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Upper bound on `_<n>` suffixes tried before giving up on a name.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Extension used when the compressed artifact has none.
const DEFAULT_EXTENSION: &str = "mp4";

/// Durable copy produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedLocation {
    /// Strategy that succeeded.
    pub strategy: SaveStrategy,
    /// Gallery identifier or destination path.
    pub location: String,
    /// Size of the saved video in bytes.
    pub size_bytes: u64,
}

/// Chooses and executes the save strategy for a compressed recording.
///
/// Strategies from [`PlatformContext::save_plan`] run strictly one after
/// another: the fallback is only attempted once the primary has failed, so
/// a successful primary never leaves a duplicate copy behind.
#[derive(Clone)]
pub struct PersistenceResolver {
    gallery: Arc<dyn MediaGallery>,
    files: Arc<dyn FileStore>,
}

impl PersistenceResolver {
    /// Create a resolver over the platform primitives.
    pub fn new(gallery: Arc<dyn MediaGallery>, files: Arc<dyn FileStore>) -> Self {
        Self { gallery, files }
    }

    pub(crate) fn files(&self) -> &Arc<dyn FileStore> {
        &self.files
    }

    /// Save `artifact` following the platform's plan.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceFailed` with every attempt's cause once the plan is
    /// exhausted. The artifact is left where it is.
    #[instrument(skip(self, artifact, context), fields(path = ?artifact.path))]
    pub async fn persist(
        &self,
        artifact: &CompressedArtifact,
        context: &PlatformContext,
    ) -> CoreResult<SavedLocation> {
        let mut failures = Vec::new();

        for &strategy in context.save_plan() {
            let attempt = match strategy {
                SaveStrategy::MediaGallery => self.save_to_gallery(&artifact.path).await,
                SaveStrategy::PublicDirectory => {
                    self.copy_to_public_dir(&artifact.path, &context.public_video_dir)
                        .await
                }
            };

            match attempt {
                Ok(location) => {
                    info!(%strategy, location = %location, size_bytes = artifact.size_bytes, "Recording saved");
                    return Ok(SavedLocation {
                        strategy,
                        location,
                        size_bytes: artifact.size_bytes,
                    });
                }
                Err(reason) => {
                    warn!(%strategy, reason = %reason, "Save attempt failed");
                    failures.push(format!("{}: {}", strategy, reason));
                }
            }
        }

        Err(SessionError::PersistenceFailed {
            cause: failures.join("; "),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn save_to_gallery(&self, path: &Path) -> Result<String, String> {
        self.gallery
            .save_video(path)
            .await
            .map_err(|e| e.to_string())
    }

    async fn copy_to_public_dir(&self, src: &Path, dir: &Path) -> Result<String, String> {
        self.files
            .ensure_dir(dir)
            .await
            .map_err(|e| format!("Failed to create {:?}: {}", dir, e))?;

        let millis = Utc::now().timestamp_millis();
        let extension = src
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(DEFAULT_EXTENSION);

        // The copy creates the destination exclusively, so a taken name is
        // detected by the write itself.
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let dest = dir.join(fallback_file_name(millis, attempt, extension));
            match self.files.copy(src, &dest).await {
                Ok(copied) => {
                    debug!(dest = ?dest, bytes = copied, "Fallback copy written");
                    return Ok(dest.display().to_string());
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(dest = ?dest, "Name taken, trying next suffix");
                }
                Err(e) => return Err(format!("Failed to copy to {:?}: {}", dest, e)),
            }
        }

        Err(format!("No free file name in {:?} for vid_{}", dir, millis))
    }
}

/// Timestamp-based name for the fallback copy: `vid_<millis>[_<n>].<ext>`.
pub(crate) fn fallback_file_name(millis: i64, attempt: u32, extension: &str) -> String {
    if attempt == 0 {
        format!("vid_{}.{}", millis, extension)
    } else {
        format!("vid_{}_{}.{}", millis, attempt, extension)
    }
}

/// User-facing confirmation shown once a session reaches `Saved`.
pub fn confirmation_message(quality: &QualityProfile, saved: &SavedLocation) -> String {
    let size_mb = saved.size_bytes as f64 / (1024.0 * 1024.0);
    format!(
        "Video saved in {} ({:.2} MB) to {}",
        quality.label, size_mb, saved.location
    )
}
