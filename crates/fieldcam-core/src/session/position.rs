use serde::{Deserialize, Serialize};

/// One GPS fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Latest value published by the position feed.
///
/// Both fields are best-effort; absence is not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionSnapshot {
    /// Most recent GPS fix.
    pub position: Option<PositionSample>,
    /// Reverse-geocoded address for `position`.
    pub address: Option<String>,
}

impl PositionSnapshot {
    /// Address line for the overlay.
    pub fn address_line(&self) -> String {
        match self.address.as_deref() {
            Some(address) if !address.trim().is_empty() => format!("Address: {}", address),
            _ => "Address unavailable".to_string(),
        }
    }
}

/// Position snapshot stored on a session when recording stops.
pub type LocationStamp = PositionSnapshot;

/// Access grants aggregated by the host platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    /// Fine location access.
    pub location: bool,
    /// Camera access.
    pub camera: bool,
    /// Microphone access.
    pub microphone: bool,
    /// Shared media / storage access.
    pub storage: bool,
}

impl PermissionSet {
    /// The capability gate signal: ready only when all four are granted.
    pub fn all_granted(&self) -> bool {
        self.location && self.camera && self.microphone && self.storage
    }
}
