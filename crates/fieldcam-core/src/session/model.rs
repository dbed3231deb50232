use crate::{
    persistence::SavedLocation,
    session::{CompressedArtifact, LocationStamp, QualityProfile, RawArtifact},
};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Opaque identifier of one recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Pipeline state of a session.
///
/// ```text
/// Idle -> Recording -> Compressing -> Persisting -> Saved
///             |             |              |
///             +-------------+--------------+----> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session has been started yet.
    Idle,
    /// The capture device is recording.
    Recording,
    /// The compression engine is working on the raw artifact.
    Compressing,
    /// The persistence resolver is saving the compressed artifact.
    Persisting,
    /// The compressed artifact has a durable, user-visible copy.
    Saved,
    /// A stage failed; see [`Session::error`].
    Failed,
}

impl SessionState {
    /// `Saved` and `Failed` end a session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Saved | Self::Failed)
    }

    /// Whether a session in this state blocks a new `start()`.
    pub fn is_active(&self) -> bool {
        !self.is_terminal() && *self != Self::Idle
    }
}

/// Pipeline stage that terminated a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// The capture device reported an error.
    Capture,
    /// The compression engine reported an error.
    Compression,
    /// Both the primary and the fallback save attempts failed.
    Persistence,
}

/// Structured detail carried by a `Failed` session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    /// Stage that failed.
    pub stage: FailureStage,
    /// Underlying cause as reported by the collaborator.
    pub cause: String,
}

impl ErrorInfo {
    /// User-facing message for the display layer.
    pub fn user_message(&self) -> String {
        let stage = match self.stage {
            FailureStage::Capture => "Recording failed",
            FailureStage::Compression => "Compression failed",
            FailureStage::Persistence => "Saving the video failed",
        };
        format!("{}: {}", stage, self.cause)
    }
}

/// Read-only snapshot of the current (or most recent) session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Session id, `None` before the first `start()`.
    pub id: Option<SessionId>,
    /// Current pipeline state.
    pub state: SessionState,
    /// Quality profile selected at `start()`.
    pub quality: Option<QualityProfile>,
    /// Artifact produced by the capture device.
    pub raw_artifact: Option<RawArtifact>,
    /// Artifact produced by the compression engine.
    pub compressed_artifact: Option<CompressedArtifact>,
    /// Compression progress, `0..=100`.
    pub progress_percent: u8,
    /// Where the persistence resolver put the video.
    pub saved_location: Option<SavedLocation>,
    /// Failure detail for `Failed` sessions.
    pub error: Option<ErrorInfo>,
    /// When `start()` accepted the session.
    pub started_at: Option<DateTime<Utc>>,
    /// Latest position and address as of the accepted `stop()`.
    pub location_stamp: Option<LocationStamp>,
    /// Success message for the display layer.
    pub confirmation: Option<String>,
}

impl Session {
    /// Snapshot reported before any session was started.
    pub fn idle() -> Self {
        Self {
            id: None,
            state: SessionState::Idle,
            quality: None,
            raw_artifact: None,
            compressed_artifact: None,
            progress_percent: 0,
            saved_location: None,
            error: None,
            started_at: None,
            location_stamp: None,
            confirmation: None,
        }
    }

    pub(crate) fn recording(id: SessionId, quality: QualityProfile) -> Self {
        Self {
            id: Some(id),
            state: SessionState::Recording,
            quality: Some(quality),
            started_at: Some(Utc::now()),
            ..Self::idle()
        }
    }

    /// Whether `event_id` addresses this session.
    pub(crate) fn is_addressed_by(&self, event_id: SessionId) -> bool {
        self.id == Some(event_id)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::idle()
    }
}
