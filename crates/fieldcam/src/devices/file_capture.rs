use fieldcam_core::{CaptureDevice, EventSink, RawArtifact, SessionId};

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
    time::Instant,
};

use tracing::{debug, info, instrument, warn};

struct ActiveCapture {
    sink: EventSink,
    started_at: Instant,
}

/// Capture device that "records" by importing an existing clip.
///
/// On stop the source is copied into the cache as `raw_<session>.<ext>` and
/// reported with the wall time between start and stop as its duration.
pub struct FileCaptureDevice {
    source: PathBuf,
    cache_dir: PathBuf,
    active: Mutex<HashMap<SessionId, ActiveCapture>>,
}

impl FileCaptureDevice {
    pub(crate) fn new(source: PathBuf, cache_dir: PathBuf) -> Self {
        Self {
            source,
            cache_dir,
            active: Mutex::new(HashMap::new()),
        }
    }

    fn active(&self) -> MutexGuard<'_, HashMap<SessionId, ActiveCapture>> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn raw_path(&self, session_id: SessionId) -> PathBuf {
        let extension = self
            .source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("mp4");
        self.cache_dir
            .join(format!("raw_{}.{}", session_id, extension))
    }
}

impl CaptureDevice for FileCaptureDevice {
    #[instrument(skip(self, sink), fields(session_id = %sink.session_id()))]
    fn start_capture(&self, sink: EventSink) {
        if !self.source.is_file() {
            warn!(source = ?self.source, "Capture source missing");
            sink.capture_finished(Err(format!(
                "Capture source not found: {}",
                self.source.display()
            )));
            return;
        }

        self.active().insert(
            sink.session_id(),
            ActiveCapture {
                sink,
                started_at: Instant::now(),
            },
        );

        info!(source = ?self.source, "Capture started");
    }

    #[instrument(skip(self))]
    fn stop_capture(&self, session_id: SessionId) {
        let Some(capture) = self.active().remove(&session_id) else {
            debug!("No capture in flight for session");
            return;
        };

        let duration_ms =
            u64::try_from(capture.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        let source = self.source.clone();
        let dest = self.raw_path(session_id);

        tokio::spawn(async move {
            let result = import_clip(&source, &dest, duration_ms)
                .await
                .map_err(|e| format!("Failed to import {}: {}", source.display(), e));
            capture.sink.capture_finished(result);
        });
    }
}

async fn import_clip(
    source: &Path,
    dest: &Path,
    duration_ms: u64,
) -> std::io::Result<RawArtifact> {
    if let Some(dir) = dest.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    let size_bytes = tokio::fs::copy(source, dest).await?;

    debug!(dest = ?dest, size_bytes, duration_ms, "Raw clip written");

    Ok(RawArtifact {
        path: dest.to_path_buf(),
        duration_ms,
        size_bytes,
    })
}
