use crate::session::{ErrorInfo, FailureStage};

use error_location::ErrorLocation;
use thiserror::Error;

/// Recording pipeline errors with source location tracking.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A session is already in a non-terminal state.
    #[error("A recording session is already active {location}")]
    AlreadyActive {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// `stop()` was called while no recording is in progress.
    #[error("No recording in progress {location}")]
    NotRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capability gate has not reported readiness.
    #[error("Location, camera, microphone and storage access are required {location}")]
    PermissionsNotGranted {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capture device reported an error instead of an artifact.
    #[error("Capture failed: {cause} {location}")]
    CaptureFailed {
        /// Description reported by the capture device.
        cause: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The compression engine reported an error instead of an artifact.
    #[error("Compression failed: {cause} {location}")]
    CompressionFailed {
        /// Description reported by the compression engine.
        cause: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Every persistence strategy in the platform plan failed.
    #[error("Persistence failed: {cause} {location}")]
    PersistenceFailed {
        /// Combined description of every failed attempt.
        cause: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl SessionError {
    /// Structured failure detail for stage errors.
    ///
    /// Precondition errors (`AlreadyActive`, `NotRecording`,
    /// `PermissionsNotGranted`) never terminate a session, so they map to `None`.
    pub fn failure_info(&self) -> Option<ErrorInfo> {
        let (stage, cause) = match self {
            SessionError::CaptureFailed { cause, .. } => (FailureStage::Capture, cause),
            SessionError::CompressionFailed { cause, .. } => (FailureStage::Compression, cause),
            SessionError::PersistenceFailed { cause, .. } => (FailureStage::Persistence, cause),
            _ => return None,
        };

        Some(ErrorInfo {
            stage,
            cause: cause.clone(),
        })
    }
}

/// Result type alias using [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;
