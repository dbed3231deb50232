use crate::{AppError, AppResult};

use fieldcam_core::QualityProfile;

use std::{panic::Location, path::PathBuf};

use clap::Parser;
use error_location::ErrorLocation;

/// Record a clip, compress it and save it with a location stamp.
#[derive(Debug, Parser)]
#[command(name = "fieldcam", version, about)]
pub struct Cli {
    /// Clip imported by the file capture device.
    #[arg(long, short)]
    pub source: PathBuf,

    /// Compression preset (480p, 720p, 1080p). Defaults to the configured preset.
    #[arg(long, short)]
    pub quality: Option<QualityProfile>,

    /// Seconds to record before stopping. Defaults to the configured duration.
    #[arg(long, short)]
    pub duration_secs: Option<u64>,
}

impl Cli {
    /// Reject arguments the pipeline cannot use.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        if !self.source.is_file() {
            return Err(AppError::InvalidArgument {
                reason: format!("Source clip not found: {}", self.source.display()),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.duration_secs == Some(0) {
            return Err(AppError::InvalidArgument {
                reason: "Duration must be at least one second".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}
