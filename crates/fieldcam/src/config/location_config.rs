use fieldcam_core::{PositionSample, PositionSnapshot};
use serde::{Deserialize, Serialize};

/// Fixed position published on the position feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Pre-resolved address for the overlay.
    #[serde(default)]
    pub address: Option<String>,
}

impl LocationConfig {
    pub(crate) fn snapshot(&self) -> PositionSnapshot {
        let position = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(PositionSample {
                latitude,
                longitude,
            }),
            _ => None,
        };

        PositionSnapshot {
            position,
            address: self.address.clone(),
        }
    }
}
