use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lowest bitrate the compression engine may choose, in bits per second.
pub const MINIMUM_BITRATE: u32 = 500_000;

/// Frame rate requested from the compression engine.
pub const TARGET_FPS: u32 = 15;

/// Named compression preset, selected between recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualityProfile {
    /// Preset label shown to the user.
    pub label: &'static str,
    /// Longest output edge in pixels.
    pub max_dimension: u32,
    /// Bitrate floor in bits per second.
    pub target_bitrate_floor: u32,
    /// Output frame rate.
    pub target_fps: u32,
}

impl QualityProfile {
    /// 480p preset.
    pub const P480: Self = Self::preset("480p", 480);
    /// 720p preset.
    pub const P720: Self = Self::preset("720p", 720);
    /// 1080p preset.
    pub const P1080: Self = Self::preset("1080p", 1080);

    /// Every preset, smallest first.
    pub const PRESETS: [Self; 3] = [Self::P480, Self::P720, Self::P1080];

    const fn preset(label: &'static str, max_dimension: u32) -> Self {
        Self {
            label,
            max_dimension,
            target_bitrate_floor: MINIMUM_BITRATE,
            target_fps: TARGET_FPS,
        }
    }

    /// Look up a preset by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.label.eq_ignore_ascii_case(label))
    }
}

impl Default for QualityProfile {
    fn default() -> Self {
        Self::P720
    }
}

impl fmt::Display for QualityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Error returned when a label names no preset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown quality preset {0:?}, expected one of 480p, 720p, 1080p")]
pub struct UnknownQuality(pub String);

impl FromStr for QualityProfile {
    type Err = UnknownQuality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownQuality(s.to_string()))
    }
}

impl Serialize for QualityProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label)
    }
}

impl<'de> Deserialize<'de> for QualityProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
