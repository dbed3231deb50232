use crate::session::{PositionSnapshot, Session, SessionId, SessionState};

use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone};
use serde::Serialize;

/// Cadence of the recording indicator; also the tick rate hosts should use.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Wall-clock format stamped on the overlay.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the display layer draws over the preview while recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayFrame {
    /// Whole seconds since `Recording` was entered.
    pub elapsed_secs: u64,
    /// `elapsed_secs` as `MM:SS`.
    pub elapsed_label: String,
    /// Whether the red recording dot is visible.
    pub blink_on: bool,
    /// Wall-clock time, refreshed once per second.
    pub timestamp: String,
    /// `Address: ...` or `Address unavailable`.
    pub address_line: String,
}

/// Derives overlay frames from session snapshots and clock ticks.
///
/// Output only: the controller never reads it back.
#[derive(Debug, Default)]
pub struct OverlayTicker {
    recording: Option<(SessionId, Instant)>,
    last_second: Option<u64>,
    timestamp: String,
}

impl OverlayTicker {
    /// Create a stopped ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether frames are currently produced.
    pub fn is_running(&self) -> bool {
        self.recording.is_some()
    }

    /// Follow the session state.
    ///
    /// A new `Recording` session restarts the clock at `now`; any other state
    /// stops the ticker and clears its output.
    pub fn observe(&mut self, session: &Session, now: Instant) {
        match (session.state, session.id) {
            (SessionState::Recording, Some(id)) => {
                let same_session = matches!(self.recording, Some((current, _)) if current == id);
                if !same_session {
                    self.reset();
                    self.recording = Some((id, now));
                }
            }
            _ => self.reset(),
        }
    }

    /// Produce the frame for `now`, or `None` while not recording.
    ///
    /// `wall` only matters when a new whole second has been reached.
    pub fn tick<Tz>(
        &mut self,
        now: Instant,
        wall: &DateTime<Tz>,
        position: &PositionSnapshot,
    ) -> Option<OverlayFrame>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let (_, since) = self.recording?;
        let elapsed = now.saturating_duration_since(since);
        let elapsed_secs = elapsed.as_secs();

        if self.last_second != Some(elapsed_secs) {
            self.last_second = Some(elapsed_secs);
            self.timestamp = format_timestamp(wall);
        }

        let half_periods = elapsed.as_millis() / BLINK_INTERVAL.as_millis();

        Some(OverlayFrame {
            elapsed_secs,
            elapsed_label: format_elapsed(elapsed_secs),
            blink_on: half_periods % 2 == 0,
            timestamp: self.timestamp.clone(),
            address_line: position.address_line(),
        })
    }

    fn reset(&mut self) {
        self.recording = None;
        self.last_second = None;
        self.timestamp.clear();
    }
}

/// `MM:SS`, with minutes growing past two digits for long recordings.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Overlay wall-clock stamp.
pub fn format_timestamp<Tz>(wall: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    wall.format(TIMESTAMP_FORMAT).to_string()
}
