//! Boundaries to the platform collaborators that do the heavy lifting.
//!
//! Both traits are fire-and-forget: implementations do their work on their
//! own tasks or threads and report through the [`EventSink`](crate::EventSink)
//! they were handed.

mod capture;
mod compression;

pub use {
    capture::CaptureDevice,
    compression::{CompressionEngine, CompressionJob},
};
