use fieldcam_core::QualityProfile;

/// Commands sent from the recording driver to the main application.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Start a new recording session.
    StartRecording {
        /// Preset used when compression begins.
        quality: QualityProfile,
    },
    /// Stop the current recording session.
    StopRecording,
    /// Request application shutdown.
    Shutdown,
}
