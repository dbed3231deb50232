use crate::{
    OverlayTicker, PositionSnapshot, QualityProfile, Session, SessionId, SessionState,
    format_elapsed,
};

use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};

fn wall(secs: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, secs)
        .single()
        .unwrap_or_default()
}

fn recording() -> Session {
    Session::recording(SessionId::new(), QualityProfile::P720)
}

/// WHAT: Ticker is silent outside Recording
/// WHY: The overlay is only drawn while recording
#[test]
fn given_idle_session_when_ticking_then_no_frame() {
    // Given: A ticker observing an idle session
    let mut ticker = OverlayTicker::new();
    let now = Instant::now();
    ticker.observe(&Session::idle(), now);

    // When: Ticking
    let frame = ticker.tick(now, &wall(0), &PositionSnapshot::default());

    // Then: Nothing to draw
    assert!(frame.is_none());
    assert!(!ticker.is_running());
}

/// WHAT: Elapsed seconds and blink follow the clock
/// WHY: Seconds tick once per second, the dot toggles every 500ms
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_ticking_every_half_second_then_elapsed_and_blink_advance() {
    // Given: A ticker that saw Recording begin at t0
    let mut ticker = OverlayTicker::new();
    let t0 = Instant::now();
    ticker.observe(&recording(), t0);
    let position = PositionSnapshot {
        address: Some("Harbour Rd 7".to_string()),
        ..PositionSnapshot::default()
    };

    // When: Ticking at 0, 0.5, 1.0 and 1.5 seconds
    let frames: Vec<_> = (0..4u32)
        .map(|i| {
            let offset = Duration::from_millis(500 * u64::from(i));
            ticker
                .tick(t0 + offset, &wall(i / 2), &position)
                .unwrap()
        })
        .collect();

    // Then: Blink starts on and alternates, seconds advance once per second
    let blink: Vec<bool> = frames.iter().map(|f| f.blink_on).collect();
    let secs: Vec<u64> = frames.iter().map(|f| f.elapsed_secs).collect();
    assert_eq!(blink, vec![true, false, true, false]);
    assert_eq!(secs, vec![0, 0, 1, 1]);
    assert_eq!(frames[3].elapsed_label, "00:01");
    assert_eq!(frames[0].timestamp, "2025-03-01 12:00:00");
    assert_eq!(frames[3].timestamp, "2025-03-01 12:00:01");
    assert_eq!(frames[0].address_line, "Address: Harbour Rd 7");
}

/// WHAT: Timestamp only refreshes on a new whole second
/// WHY: The wall clock is recomputed once per second, not per blink
#[test]
#[allow(clippy::unwrap_used)]
fn given_half_second_tick_when_wall_clock_differs_then_timestamp_kept() {
    // Given: A ticker that stamped 12:00:00 at t0
    let mut ticker = OverlayTicker::new();
    let t0 = Instant::now();
    ticker.observe(&recording(), t0);
    let position = PositionSnapshot::default();
    ticker.tick(t0, &wall(0), &position).unwrap();

    // When: The half-second tick sees a later wall clock
    let frame = ticker
        .tick(t0 + Duration::from_millis(500), &wall(30), &position)
        .unwrap();

    // Then: Timestamp from the whole-second tick is kept
    assert_eq!(frame.timestamp, "2025-03-01 12:00:00");
}

/// WHAT: Leaving Recording stops and resets the ticker
/// WHY: The elapsed counter restarts at zero for the next recording
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_left_when_new_recording_starts_then_elapsed_resets() {
    // Given: A ticker that ran for 3 seconds
    let mut ticker = OverlayTicker::new();
    let t0 = Instant::now();
    let first = recording();
    ticker.observe(&first, t0);
    let position = PositionSnapshot::default();
    let frame = ticker
        .tick(t0 + Duration::from_secs(3), &wall(3), &position)
        .unwrap();
    assert_eq!(frame.elapsed_secs, 3);

    // When: The session moves on, then a new session starts recording
    let mut compressing = first.clone();
    compressing.state = SessionState::Compressing;
    ticker.observe(&compressing, t0 + Duration::from_secs(4));
    let stopped = ticker.tick(t0 + Duration::from_secs(4), &wall(4), &position);
    let t1 = t0 + Duration::from_secs(10);
    ticker.observe(&recording(), t1);
    let restarted = ticker.tick(t1, &wall(10), &position).unwrap();

    // Then: No frame in between, and the new clock starts at zero
    assert!(stopped.is_none());
    assert_eq!(restarted.elapsed_secs, 0);
    assert_eq!(restarted.elapsed_label, "00:00");
    assert_eq!(restarted.timestamp, "2025-03-01 12:00:10");
}

/// WHAT: Re-observing the same recording keeps the clock
/// WHY: Progress snapshots of the same session must not restart the timer
#[test]
#[allow(clippy::unwrap_used)]
fn given_same_session_observed_twice_when_ticking_then_clock_kept() {
    // Given: A recording observed at t0 and again at t0+2s
    let mut ticker = OverlayTicker::new();
    let t0 = Instant::now();
    let session = recording();
    ticker.observe(&session, t0);
    ticker.observe(&session, t0 + Duration::from_secs(2));

    // When: Ticking at t0+2.5s
    let frame = ticker
        .tick(
            t0 + Duration::from_millis(2_500),
            &wall(2),
            &PositionSnapshot::default(),
        )
        .unwrap();

    // Then: Elapsed measured from t0
    assert_eq!(frame.elapsed_secs, 2);
    assert_eq!(frame.address_line, "Address unavailable");
}

/// WHAT: Elapsed label formatting
/// WHY: Minutes keep growing past an hour
#[test]
fn given_seconds_when_formatting_then_mm_ss() {
    // Given/When/Then: Assorted durations
    assert_eq!(format_elapsed(0), "00:00");
    assert_eq!(format_elapsed(75), "01:15");
    assert_eq!(format_elapsed(6_000), "100:00");
}
