use crate::{
    CoreResult, SessionError,
    persistence::{
        FileStore, PersistenceResolver, PlatformContext, SavedLocation, confirmation_message,
    },
    pipeline::{CaptureDevice, CompressionEngine, CompressionJob},
    session::{
        CompressedArtifact, EventSink, PipelineEvent, PositionSnapshot, QualityProfile,
        RawArtifact, RecordingStats, Session, SessionId, SessionState,
    },
};

use std::{panic::Location, path::Path, sync::Arc};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

/// Collaborators the controller drives.
#[derive(Clone)]
pub struct Collaborators {
    /// Ready signal from the capability gate.
    pub gate: watch::Receiver<bool>,
    /// Latest position and address from the position feed.
    pub position: watch::Receiver<PositionSnapshot>,
    /// Camera/microphone recorder.
    pub capture: Arc<dyn CaptureDevice>,
    /// Video compressor.
    pub compressor: Arc<dyn CompressionEngine>,
    /// Save strategy executor.
    pub resolver: PersistenceResolver,
    /// Where the resolver runs.
    pub platform: PlatformContext,
}

/// State machine orchestrating capture, compression and persistence for one
/// recording at a time.
///
/// # Event Loop
///
/// All methods are meant to be called from a single task. `start()` and
/// `stop()` only issue commands; progress is made by feeding the
/// notifications returned by [`next_event`](Self::next_event) back into
/// [`handle_event`](Self::handle_event), which is the only place session
/// state changes after `start()`.
///
/// # Limitations
///
/// Once compression has started the session runs to `Saved` or `Failed`;
/// there is no cancellation and no watchdog.
pub struct SessionController {
    collaborators: Collaborators,
    stats: Arc<RecordingStats>,
    session: Session,
    status_tx: watch::Sender<Session>,
    events_tx: mpsc::UnboundedSender<PipelineEvent>,
    events_rx: mpsc::UnboundedReceiver<PipelineEvent>,
}

impl SessionController {
    /// Create an idle controller.
    pub fn new(collaborators: Collaborators, stats: Arc<RecordingStats>) -> Self {
        let (status_tx, _) = watch::channel(Session::idle());
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            collaborators,
            stats,
            session: Session::idle(),
            status_tx,
            events_tx,
            events_rx,
        }
    }

    /// Begin a new recording.
    ///
    /// # Errors
    ///
    /// `AlreadyActive` while another session is non-terminal,
    /// `PermissionsNotGranted` while the capability gate reads false. Neither
    /// touches the current session.
    #[track_caller]
    #[instrument(skip(self), fields(quality = %quality))]
    pub fn start(&mut self, quality: QualityProfile) -> CoreResult<SessionId> {
        if self.session.state.is_active() {
            return Err(SessionError::AlreadyActive {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !*self.collaborators.gate.borrow() {
            return Err(SessionError::PermissionsNotGranted {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let session_id = SessionId::new();
        self.session = Session::recording(session_id, quality);
        self.stats.record_started();
        self.publish();

        self.collaborators
            .capture
            .start_capture(EventSink::new(session_id, self.events_tx.clone()));

        info!(session_id = %session_id, "Recording started");

        Ok(session_id)
    }

    /// Ask the capture device to finalize the active recording.
    ///
    /// The session stays in `Recording` until the device's completion
    /// notification arrives.
    ///
    /// # Errors
    ///
    /// `NotRecording` outside the `Recording` state.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<()> {
        let session_id = match (self.session.state, self.session.id) {
            (SessionState::Recording, Some(id)) => id,
            _ => {
                return Err(SessionError::NotRecording {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let stamp = self.collaborators.position.borrow().clone();
        debug!(session_id = %session_id, address = ?stamp.address, "Location stamped");
        self.session.location_stamp = Some(stamp);
        self.publish();

        self.collaborators.capture.stop_capture(session_id);

        info!(session_id = %session_id, "Stop requested");

        Ok(())
    }

    /// Current session snapshot.
    pub fn status(&self) -> Session {
        self.session.clone()
    }

    /// Receiver that observes a new snapshot on every state or progress change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.status_tx.subscribe()
    }

    /// Shared statistics collector.
    pub fn stats(&self) -> &Arc<RecordingStats> {
        &self.stats
    }

    /// Sink addressed to an arbitrary session, for hosts that relay
    /// notifications from their own plumbing.
    pub fn sink_for(&self, session_id: SessionId) -> EventSink {
        EventSink::new(session_id, self.events_tx.clone())
    }

    /// Wait for the next collaborator notification.
    ///
    /// Never yields `None` while the controller is alive, since it holds a
    /// sender itself.
    pub async fn next_event(&mut self) -> Option<PipelineEvent> {
        self.events_rx.recv().await
    }

    /// Pump notifications until the active session is terminal.
    ///
    /// Returns immediately with the current snapshot when no session is active.
    pub async fn run_until_settled(&mut self) -> Session {
        while self.session.state.is_active() {
            match self.events_rx.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        self.status()
    }

    /// The single state-transition function.
    ///
    /// Notifications for another session, or of a kind the current state
    /// does not expect, are dropped without effect.
    #[instrument(skip(self, event), fields(session_id = %event.session_id()))]
    pub fn handle_event(&mut self, event: PipelineEvent) {
        if !self.session.is_addressed_by(event.session_id()) {
            warn!(current = ?self.session.id, "Ignoring notification for superseded session");
            return;
        }

        match (self.session.state, event) {
            (SessionState::Recording, PipelineEvent::CaptureFinished { result, .. }) => {
                self.on_capture_finished(result)
            }
            (SessionState::Compressing, PipelineEvent::CompressionProgress { percent, .. }) => {
                self.on_progress(percent)
            }
            (SessionState::Compressing, PipelineEvent::CompressionFinished { result, .. }) => {
                self.on_compression_finished(result)
            }
            (SessionState::Persisting, PipelineEvent::PersistenceFinished { result, .. }) => {
                self.on_persistence_finished(result)
            }
            (state, event) => {
                warn!(?state, ?event, "Ignoring notification not expected in current state");
            }
        }
    }

    fn on_capture_finished(&mut self, result: Result<RawArtifact, String>) {
        let raw = match result {
            Ok(raw) => raw,
            Err(cause) => {
                self.fail(SessionError::CaptureFailed {
                    cause,
                    location: ErrorLocation::from(Location::caller()),
                });
                return;
            }
        };

        self.stats.record_captured();

        let Some(session_id) = self.session.id else {
            return;
        };
        let quality = self.session.quality.unwrap_or_default();

        info!(
            session_id = %session_id,
            path = ?raw.path,
            duration_ms = raw.duration_ms,
            "Capture finished, compressing"
        );

        self.session.raw_artifact = Some(raw.clone());
        self.session.progress_percent = 0;
        self.session.state = SessionState::Compressing;
        self.publish();

        self.collaborators.compressor.compress(
            CompressionJob { raw, quality },
            EventSink::new(session_id, self.events_tx.clone()),
        );
    }

    fn on_progress(&mut self, percent: u8) {
        if percent > 100 || percent < self.session.progress_percent {
            warn!(
                percent,
                current = self.session.progress_percent,
                "Discarding out-of-range progress"
            );
            return;
        }
        if percent == self.session.progress_percent {
            return;
        }

        debug!(percent, "Compression progress");
        self.session.progress_percent = percent;
        self.publish();
    }

    fn on_compression_finished(&mut self, result: Result<CompressedArtifact, String>) {
        let compressed = match result {
            Ok(compressed) => compressed,
            Err(cause) => {
                self.fail(SessionError::CompressionFailed {
                    cause,
                    location: ErrorLocation::from(Location::caller()),
                });
                return;
            }
        };

        let Some(session_id) = self.session.id else {
            return;
        };

        info!(
            session_id = %session_id,
            path = ?compressed.path,
            size_mb = %format!("{:.2}", compressed.size_mb()),
            "Compression finished, persisting"
        );

        self.session.compressed_artifact = Some(compressed.clone());
        self.session.progress_percent = 100;
        self.session.state = SessionState::Persisting;
        self.publish();

        self.spawn_handoff(session_id, compressed);
    }

    /// Reclaim the raw capture, then persist the compressed artifact, off the
    /// event loop. The result comes back as `PersistenceFinished`.
    fn spawn_handoff(&self, session_id: SessionId, compressed: CompressedArtifact) {
        let raw = self.session.raw_artifact.clone();
        let resolver = self.collaborators.resolver.clone();
        let platform = self.collaborators.platform.clone();
        let sink = EventSink::new(session_id, self.events_tx.clone());

        tokio::spawn(async move {
            if let Some(raw) = raw {
                if same_file(resolver.files().as_ref(), &raw.path, &compressed.path).await {
                    debug!(
                        session_id = %session_id,
                        path = ?raw.path,
                        "Compressed in place, raw capture kept as output"
                    );
                } else {
                    match resolver.files().remove(&raw.path).await {
                        Ok(()) => debug!(session_id = %session_id, path = ?raw.path, "Raw capture reclaimed"),
                        Err(e) => warn!(
                            session_id = %session_id,
                            path = ?raw.path,
                            error = %e,
                            "Failed to reclaim raw capture"
                        ),
                    }
                }
            }

            let result = resolver.persist(&compressed, &platform).await;
            sink.persistence_finished(result);
        });
    }

    fn on_persistence_finished(&mut self, result: CoreResult<SavedLocation>) {
        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                self.fail(e);
                return;
            }
        };

        let quality = self.session.quality.unwrap_or_default();
        let message = confirmation_message(&quality, &saved);

        info!(
            session_id = ?self.session.id,
            strategy = %saved.strategy,
            location = %saved.location,
            "Session saved"
        );

        self.session.saved_location = Some(saved);
        self.session.confirmation = Some(message);
        self.session.state = SessionState::Saved;
        self.stats.record_saved();
        self.publish();
    }

    fn fail(&mut self, error: SessionError) {
        error!(session_id = ?self.session.id, error = %error, "Session failed");

        self.session.error = error.failure_info();
        self.session.state = SessionState::Failed;
        self.stats.record_failed();
        self.publish();
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.session.clone());
    }
}

/// Whether `a` and `b` name the same file, comparing canonical paths when
/// both resolve.
async fn same_file(files: &dyn FileStore, a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (files.canonicalize(a).await, files.canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
