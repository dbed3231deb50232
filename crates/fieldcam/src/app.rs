use crate::{
    AppCommand, AppResult,
    config::Config,
    devices::{FileCaptureDevice, FolderGallery, PassthroughCompressor},
};

use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Local;
use fieldcam_core::{
    BLINK_INTERVAL, CaptureDevice, Collaborators, CompressionEngine, OverlayTicker,
    PersistenceResolver, PositionSnapshot, QualityProfile, RecordingStats, Session,
    SessionController, SessionError, TokioFileStore,
};
use tokio::{
    sync::{mpsc, watch},
    time::MissedTickBehavior,
};
use tracing::{debug, info, instrument, trace, warn};

/// How a run ended: the last session snapshot, plus the reason a start was
/// refused when it never began recording.
#[derive(Debug)]
pub struct RunOutcome {
    pub(crate) session: Session,
    pub(crate) refusal: Option<String>,
}

/// Main application state.
///
/// Owns the session controller and drives it from one loop: driver
/// commands, collaborator notifications, status changes and the overlay clock.
pub struct App {
    pub(crate) controller: SessionController,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) position_rx: watch::Receiver<PositionSnapshot>,
    ticker: OverlayTicker,
    last_drawn_second: Option<u64>,
    refusal: Option<String>,
}

impl App {
    /// Wire the desktop devices from `config` and return the app with its
    /// command sender.
    pub(crate) fn new(config: &Config, source: PathBuf) -> (Self, mpsc::Sender<AppCommand>) {
        let permissions = config.permissions.permission_set();
        if !permissions.all_granted() {
            warn!(?permissions, "Not every permission is granted, recording will be refused");
        }

        let (_, gate) = watch::channel(permissions.all_granted());
        let (_, position_rx) = watch::channel(config.location.snapshot());

        let cache_dir = config.storage.cache_dir.clone();
        let resolver = PersistenceResolver::new(
            Arc::new(FolderGallery::new(config.storage.gallery_dir.clone())),
            Arc::new(TokioFileStore),
        );

        let collaborators = Collaborators {
            gate,
            position: position_rx.clone(),
            capture: Arc::new(FileCaptureDevice::new(source, cache_dir.clone()))
                as Arc<dyn CaptureDevice>,
            compressor: Arc::new(PassthroughCompressor::new(cache_dir))
                as Arc<dyn CompressionEngine>,
            resolver,
            platform: config.platform_context(),
        };

        let (command_tx, command_rx) = mpsc::channel(32);

        let app = Self {
            controller: SessionController::new(collaborators, Arc::new(RecordingStats::new())),
            command_rx,
            position_rx,
            ticker: OverlayTicker::new(),
            last_drawn_second: None,
            refusal: None,
        };

        (app, command_tx)
    }

    /// Shared statistics of the controller.
    pub(crate) fn stats(&self) -> Arc<RecordingStats> {
        Arc::clone(self.controller.stats())
    }

    /// Run until the session settles, a start is refused, or shutdown is
    /// requested.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<RunOutcome> {
        info!("FieldCam starting");

        let mut status_rx = self.controller.subscribe();
        let mut overlay = tokio::time::interval(BLINK_INTERVAL);
        overlay.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::StartRecording { quality } => {
                            match self.controller.start(quality) {
                                Ok(session_id) => {
                                    info!(session_id = %session_id, %quality, "Recording started");
                                }
                                Err(e) => {
                                    self.refusal = Some(refusal_message(&e));
                                    warn!(error = ?e, "Recording refused");
                                    break;
                                }
                            }
                        }
                        AppCommand::StopRecording => {
                            if let Err(e) = self.controller.stop() {
                                warn!(error = ?e, "Stop ignored");
                            }
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                Some(event) = self.controller.next_event() => {
                    self.controller.handle_event(event);
                }

                Ok(()) = status_rx.changed() => {
                    let session = status_rx.borrow_and_update().clone();
                    self.ticker.observe(&session, Instant::now());
                    debug!(
                        session_id = ?session.id,
                        state = ?session.state,
                        progress = session.progress_percent,
                        "Session updated"
                    );
                    if session.state.is_terminal() {
                        break;
                    }
                }

                _ = overlay.tick() => {
                    self.draw_overlay();
                }
            }
        }

        info!("FieldCam shut down");

        Ok(RunOutcome {
            session: self.controller.status(),
            refusal: self.refusal,
        })
    }

    fn draw_overlay(&mut self) {
        let position = self.position_rx.borrow().clone();
        let Some(frame) = self
            .ticker
            .tick(Instant::now(), &Local::now(), &position)
        else {
            self.last_drawn_second = None;
            return;
        };

        if self.last_drawn_second == Some(frame.elapsed_secs) {
            trace!(blink = frame.blink_on, "Overlay blink");
            return;
        }
        self.last_drawn_second = Some(frame.elapsed_secs);

        info!(
            elapsed = %frame.elapsed_label,
            timestamp = %frame.timestamp,
            address = %frame.address_line,
            blink = frame.blink_on,
            "REC"
        );
    }
}

/// Start a recording, stop it after `duration` or on Ctrl-C, then shut the
/// app down on a second Ctrl-C.
#[instrument(skip(commands))]
pub(crate) async fn drive_recording(
    commands: mpsc::Sender<AppCommand>,
    quality: QualityProfile,
    duration: Duration,
) {
    if commands
        .send(AppCommand::StartRecording { quality })
        .await
        .is_err()
    {
        return;
    }

    tokio::select! {
        _ = tokio::time::sleep(duration) => {
            info!(duration_secs = duration.as_secs(), "Recording duration reached");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = ?e, "Failed to listen for Ctrl-C");
            }
            info!("Interrupted, stopping early");
        }
    }

    if commands.send(AppCommand::StopRecording).await.is_err() {
        return;
    }

    if tokio::signal::ctrl_c().await.is_ok() {
        let _ = commands.send(AppCommand::Shutdown).await;
    }
}

fn refusal_message(error: &SessionError) -> String {
    match error {
        SessionError::PermissionsNotGranted { .. } => {
            "Camera, microphone, storage and location permissions are required".to_string()
        }
        SessionError::AlreadyActive { .. } => "A recording is already in progress".to_string(),
        other => other.to_string(),
    }
}
