use crate::session::{EventSink, QualityProfile, RawArtifact};

/// Work handed to the compression engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionJob {
    /// Captured file to compress.
    pub raw: RawArtifact,
    /// Preset read once when compression starts.
    pub quality: QualityProfile,
}

/// Video compressor with progress reporting.
pub trait CompressionEngine: Send + Sync {
    /// Start compressing `job.raw`.
    ///
    /// Must return immediately. The engine reports zero or more
    /// [`EventSink::progress`] updates followed by exactly one
    /// [`EventSink::compression_finished`].
    fn compress(&self, job: CompressionJob, sink: EventSink);
}
