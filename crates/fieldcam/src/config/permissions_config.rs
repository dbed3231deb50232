use crate::config::default_granted;

use fieldcam_core::PermissionSet;
use serde::{Deserialize, Serialize};

/// Access grants reported to the capability gate.
///
/// A desktop host has no permission prompts, so the grants are declared here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// Location access.
    #[serde(default = "default_granted")]
    pub location: bool,
    /// Camera access.
    #[serde(default = "default_granted")]
    pub camera: bool,
    /// Microphone access.
    #[serde(default = "default_granted")]
    pub microphone: bool,
    /// Storage access.
    #[serde(default = "default_granted")]
    pub storage: bool,
}

impl PermissionsConfig {
    pub(crate) fn permission_set(&self) -> PermissionSet {
        PermissionSet {
            location: self.location,
            camera: self.camera,
            microphone: self.microphone,
            storage: self.storage,
        }
    }
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            location: true,
            camera: true,
            microphone: true,
            storage: true,
        }
    }
}
