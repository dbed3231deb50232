mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod location_config;
mod permissions_config;
mod platform_config;
mod storage_config;

pub(crate) use {
    capture_config::CaptureConfig, config::Config, location_config::LocationConfig,
    permissions_config::PermissionsConfig, platform_config::PlatformConfig,
    storage_config::StorageConfig,
};

#[cfg(test)]
pub(crate) use platform_config::PlatformKind;

pub(crate) const DEFAULT_DURATION_SECS: u64 = 5;
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "fieldcam";
pub(crate) const APP_NAME: &str = "FieldCam";

pub(crate) fn default_duration_secs() -> u64 {
    DEFAULT_DURATION_SECS
}

pub(crate) fn default_granted() -> bool {
    true
}
