use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Process-wide pipeline counters.
///
/// Created once by the host and shared with the controller by `Arc`.
/// Counters only move for notifications the controller accepted, so a
/// stale completion never counts a recording twice.
#[derive(Debug, Default)]
pub struct RecordingStats {
    started: AtomicU64,
    captured: AtomicU64,
    saved: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`RecordingStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Sessions accepted by `start()`.
    pub started: u64,
    /// Sessions whose capture produced an artifact.
    pub captured: u64,
    /// Sessions that reached `Saved`.
    pub saved: u64,
    /// Sessions that reached `Failed`.
    pub failed: u64,
}

impl RecordingStats {
    /// Create a collector with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_started(&self) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_captured(&self) {
        self.captured.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_saved(&self) {
        self.saved.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            started: self.started.load(Ordering::Relaxed),
            captured: self.captured.load(Ordering::Relaxed),
            saved: self.saved.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
