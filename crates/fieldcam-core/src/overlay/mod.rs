//! Display state for the recording overlay.

mod ticker;

pub use ticker::{
    BLINK_INTERVAL, OverlayFrame, OverlayTicker, TIMESTAMP_FORMAT, format_elapsed,
    format_timestamp,
};
