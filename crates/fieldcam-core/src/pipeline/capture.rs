use crate::session::{EventSink, SessionId};

/// Platform camera/microphone recorder.
pub trait CaptureDevice: Send + Sync {
    /// Begin recording for `sink.session_id()`.
    ///
    /// Must return immediately. The device reports exactly one
    /// [`EventSink::capture_finished`] once the recording is finalized or
    /// has failed.
    fn start_capture(&self, sink: EventSink);

    /// Ask the device to finalize the recording of `session_id`.
    fn stop_capture(&self, session_id: SessionId);
}
