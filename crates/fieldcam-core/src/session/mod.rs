mod artifact;
mod controller;
mod event;
mod model;
mod position;
mod quality;
mod stats;

pub use {
    artifact::{CompressedArtifact, RawArtifact},
    controller::{Collaborators, SessionController},
    event::{EventSink, PipelineEvent},
    model::{ErrorInfo, FailureStage, Session, SessionId, SessionState},
    position::{LocationStamp, PermissionSet, PositionSample, PositionSnapshot},
    quality::{MINIMUM_BITRATE, QualityProfile, TARGET_FPS, UnknownQuality},
    stats::{RecordingStats, StatsSnapshot},
};
