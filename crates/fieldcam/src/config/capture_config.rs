use crate::config::{DEFAULT_DURATION_SECS, default_duration_secs};

use fieldcam_core::QualityProfile;
use serde::{Deserialize, Serialize};

/// Recording defaults used when the CLI does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Preset label (`480p`, `720p`, `1080p`).
    #[serde(default)]
    pub default_quality: QualityProfile,

    /// How long to record before stopping, in seconds.
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            default_quality: QualityProfile::default(),
            default_duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}
