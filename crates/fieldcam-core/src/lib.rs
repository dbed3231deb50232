//! FieldCam Core Library
//!
//! Recording session pipeline: capture, compression with progress, and
//! persistence with platform-dependent fallback, one session at a time.
//!
//! # Example
//!
//! ```no_run
//! use fieldcam_core::{Collaborators, QualityProfile, RecordingStats, SessionController};
//!
//! use std::sync::Arc;
//!
//! async fn record(collaborators: Collaborators) -> fieldcam_core::CoreResult<()> {
//!     let mut controller = SessionController::new(collaborators, Arc::new(RecordingStats::new()));
//!
//!     controller.start(QualityProfile::P720)?;
//!     // ... later, from the UI ...
//!     controller.stop()?;
//!
//!     let session = controller.run_until_settled().await;
//!     println!("{:?}: {:?}", session.state, session.confirmation);
//!     Ok(())
//! }
//! ```

mod error;
mod overlay;
mod persistence;
mod pipeline;
mod session;

pub use {
    error::{Result as CoreResult, SessionError},
    overlay::{
        BLINK_INTERVAL, OverlayFrame, OverlayTicker, TIMESTAMP_FORMAT, format_elapsed,
        format_timestamp,
    },
    persistence::{
        ANDROID_SCOPED_MEDIA_API_LEVEL, FileStore, MediaGallery, PersistenceResolver, Platform,
        PlatformContext, PrimitiveError, SaveStrategy, SavedLocation, TokioFileStore,
        confirmation_message,
    },
    pipeline::{CaptureDevice, CompressionEngine, CompressionJob},
    session::{
        Collaborators, CompressedArtifact, ErrorInfo, EventSink, FailureStage, LocationStamp,
        MINIMUM_BITRATE, PermissionSet, PipelineEvent, PositionSample, PositionSnapshot,
        QualityProfile, RawArtifact, RecordingStats, Session, SessionController, SessionId,
        SessionState, StatsSnapshot, TARGET_FPS, UnknownQuality,
    },
};

#[cfg(test)]
mod tests;
