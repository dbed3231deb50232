use std::{fmt, path::PathBuf};

use serde::Serialize;

/// First Android API level (13, Tiramisu) with scoped media permissions.
///
/// Below it the shared gallery primitive is not used and recordings go
/// straight to the public video directory.
pub const ANDROID_SCOPED_MEDIA_API_LEVEL: u32 = 33;

/// Host operating system, with the version details that change the save path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Android at the given API level.
    Android {
        /// `Build.VERSION.SDK_INT` of the device.
        api_level: u32,
    },
    /// iOS / iPadOS.
    Ios,
    /// Desktop host (development harness).
    Desktop,
}

/// A way of producing a durable copy of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStrategy {
    /// The platform's "save to shared media gallery" primitive.
    MediaGallery,
    /// Direct file copy into the public video directory.
    PublicDirectory,
}

impl fmt::Display for SaveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStrategy::MediaGallery => f.write_str("media gallery"),
            SaveStrategy::PublicDirectory => f.write_str("public directory"),
        }
    }
}

/// Everything the resolver needs to know about where it is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformContext {
    /// Host platform and version.
    pub platform: Platform,
    /// Well-known public video directory (`DCIM/Camera` on Android).
    pub public_video_dir: PathBuf,
}

impl PlatformContext {
    /// Strategies to try, in order. The first entry is the primary.
    pub fn save_plan(&self) -> &'static [SaveStrategy] {
        const GALLERY_THEN_COPY: &[SaveStrategy] =
            &[SaveStrategy::MediaGallery, SaveStrategy::PublicDirectory];
        const COPY_ONLY: &[SaveStrategy] = &[SaveStrategy::PublicDirectory];

        match self.platform {
            Platform::Android { api_level } if api_level < ANDROID_SCOPED_MEDIA_API_LEVEL => {
                COPY_ONLY
            }
            Platform::Android { .. } | Platform::Ios | Platform::Desktop => GALLERY_THEN_COPY,
        }
    }
}
