//! Configuration management for fieldcam.
//!
//! Loads and saves the TOML configuration file under the platform config
//! directory, creating one with host-appropriate storage paths on first run.

use crate::{
    AppError, AppResult,
    config::{
        APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, CaptureConfig, LocationConfig,
        PermissionsConfig, PlatformConfig, StorageConfig,
    },
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use directories::{ProjectDirs, UserDirs};
use error_location::ErrorLocation;
use fieldcam_core::PlatformContext;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Recording defaults.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Artifact directories.
    pub storage: StorageConfig,
    /// Platform the save plan is chosen for.
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Declared permission grants.
    #[serde(default)]
    pub permissions: PermissionsConfig,
    /// Fixed position for the overlay and location stamp.
    #[serde(default)]
    pub location: LocationConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config = Self::from_toml_str(&contents)?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Parse configuration text.
    #[track_caller]
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Save configuration to disk using atomic write pattern.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Write to a sibling temp file, then rename over `config_path`.
    #[track_caller]
    pub(crate) fn save_to(&self, config_path: &std::path::Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(())
    }

    /// Platform and fallback directory handed to the persistence resolver.
    pub(crate) fn platform_context(&self) -> PlatformContext {
        PlatformContext {
            platform: self.platform.platform(),
            public_video_dir: self.storage.public_video_dir.clone(),
        }
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let proj_dirs = Self::project_dirs()?;
        let cache_dir = proj_dirs.cache_dir().join("videos");

        let public_video_dir = UserDirs::new()
            .and_then(|dirs| dirs.video_dir().map(|dir| dir.join(APP_NAME)))
            .unwrap_or_else(|| proj_dirs.cache_dir().join("public"));

        let config = Config {
            capture: CaptureConfig::default(),
            storage: StorageConfig {
                cache_dir,
                public_video_dir,
                gallery_dir: None,
            },
            platform: PlatformConfig::default(),
            permissions: PermissionsConfig::default(),
            location: LocationConfig::default(),
        };

        config.save()?;

        info!(
            cache_dir = ?config.storage.cache_dir,
            public_video_dir = ?config.storage.public_video_dir,
            "Default config created"
        );

        Ok(config)
    }
}
