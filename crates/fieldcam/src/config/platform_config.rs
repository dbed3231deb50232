use fieldcam_core::{ANDROID_SCOPED_MEDIA_API_LEVEL, Platform};
use serde::{Deserialize, Serialize};

/// Platform family the save plan is chosen for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Desktop host.
    #[default]
    Desktop,
    /// Android device.
    Android,
    /// iOS device.
    Ios,
}

/// Platform emulated by the persistence resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Platform family.
    #[serde(default)]
    pub kind: PlatformKind,

    /// Android API level (ignored elsewhere).
    #[serde(default)]
    pub api_level: Option<u32>,
}

impl PlatformConfig {
    pub(crate) fn platform(&self) -> Platform {
        match self.kind {
            PlatformKind::Desktop => Platform::Desktop,
            PlatformKind::Ios => Platform::Ios,
            PlatformKind::Android => Platform::Android {
                api_level: self.api_level.unwrap_or(ANDROID_SCOPED_MEDIA_API_LEVEL),
            },
        }
    }
}
