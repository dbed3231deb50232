use crate::{
    CoreResult,
    persistence::SavedLocation,
    session::{CompressedArtifact, RawArtifact, SessionId},
};

use tokio::sync::mpsc;
use tracing::debug;

/// Notifications delivered into the controller's transition function.
///
/// Every variant names the session it belongs to so notifications from a
/// superseded session can be recognised and dropped.
#[derive(Debug)]
pub enum PipelineEvent {
    /// The capture device finalized the recording.
    CaptureFinished {
        /// Session the capture belonged to.
        session_id: SessionId,
        /// Raw artifact, or the device's error description.
        result: Result<RawArtifact, String>,
    },
    /// The compression engine made progress.
    CompressionProgress {
        /// Session being compressed.
        session_id: SessionId,
        /// Percentage complete.
        percent: u8,
    },
    /// The compression engine produced its terminal result.
    CompressionFinished {
        /// Session being compressed.
        session_id: SessionId,
        /// Compressed artifact, or the engine's error description.
        result: Result<CompressedArtifact, String>,
    },
    /// The persistence hand-off completed.
    PersistenceFinished {
        /// Session being persisted.
        session_id: SessionId,
        /// Saved location, or `PersistenceFailed`.
        result: CoreResult<SavedLocation>,
    },
}

impl PipelineEvent {
    /// Session this notification is addressed to.
    pub fn session_id(&self) -> SessionId {
        match self {
            PipelineEvent::CaptureFinished { session_id, .. }
            | PipelineEvent::CompressionProgress { session_id, .. }
            | PipelineEvent::CompressionFinished { session_id, .. }
            | PipelineEvent::PersistenceFinished { session_id, .. } => *session_id,
        }
    }
}

/// Handle given to collaborators for reporting back to the controller.
///
/// Bound to one session; notifications sent after the controller is gone
/// are dropped.
#[derive(Debug, Clone)]
pub struct EventSink {
    session_id: SessionId,
    tx: mpsc::UnboundedSender<PipelineEvent>,
}

impl EventSink {
    pub(crate) fn new(session_id: SessionId, tx: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        Self { session_id, tx }
    }

    /// Session this sink reports for.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Report the capture device's single completion.
    pub fn capture_finished(&self, result: Result<RawArtifact, String>) {
        self.send(PipelineEvent::CaptureFinished {
            session_id: self.session_id,
            result,
        });
    }

    /// Report compression progress as a percentage.
    pub fn progress(&self, percent: u8) {
        self.send(PipelineEvent::CompressionProgress {
            session_id: self.session_id,
            percent,
        });
    }

    /// Report the compression engine's terminal result.
    pub fn compression_finished(&self, result: Result<CompressedArtifact, String>) {
        self.send(PipelineEvent::CompressionFinished {
            session_id: self.session_id,
            result,
        });
    }

    pub(crate) fn persistence_finished(&self, result: CoreResult<SavedLocation>) {
        self.send(PipelineEvent::PersistenceFinished {
            session_id: self.session_id,
            result,
        });
    }

    fn send(&self, event: PipelineEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!(session_id = %self.session_id, event = ?e.0, "Controller gone, notification dropped");
        }
    }
}
