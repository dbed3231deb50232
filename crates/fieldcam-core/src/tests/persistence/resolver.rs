use crate::{
    CompressedArtifact, Platform, PlatformContext, QualityProfile, SaveStrategy, SavedLocation,
    SessionError, confirmation_message, persistence::fallback_file_name,
    tests::fakes::{Journal, resolver_with},
};

use std::{path::PathBuf, sync::Arc};

fn artifact() -> CompressedArtifact {
    CompressedArtifact {
        path: PathBuf::from("/cache/videos/clip_720p.mp4"),
        size_bytes: 2_000_000,
    }
}

fn context() -> PlatformContext {
    PlatformContext {
        platform: Platform::Ios,
        public_video_dir: PathBuf::from("/public"),
    }
}

/// WHAT: Primary success never touches the fallback
/// WHY: Running both would create a duplicate gallery entry
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_gallery_succeeds_when_persisting_then_no_copy_attempted() {
    // Given: A working gallery
    let journal = Arc::new(Journal::default());
    let resolver = resolver_with(false, false, 0, Arc::clone(&journal));

    // When: Persisting
    let saved = resolver.persist(&artifact(), &context()).await.unwrap();

    // Then: Gallery only
    assert_eq!(saved.strategy, SaveStrategy::MediaGallery);
    assert_eq!(saved.size_bytes, 2_000_000);
    assert_eq!(
        journal.entries(),
        vec!["gallery:/cache/videos/clip_720p.mp4".to_string()]
    );
}

/// WHAT: Fallback creates the directory, then copies under a vid_ name
/// WHY: The public directory may not exist on first use
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_gallery_fails_when_persisting_then_dir_ensured_before_copy() {
    // Given: A failing gallery
    let journal = Arc::new(Journal::default());
    let resolver = resolver_with(true, false, 0, Arc::clone(&journal));

    // When: Persisting
    let saved = resolver.persist(&artifact(), &context()).await.unwrap();

    // Then: gallery -> ensure_dir -> copy, destination named vid_*.mp4
    let entries = journal.entries();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].starts_with("gallery:"));
    assert_eq!(entries[1], "ensure_dir:/public");
    assert!(entries[2].starts_with("copy:/cache/videos/clip_720p.mp4->/public/vid_"));
    assert_eq!(saved.strategy, SaveStrategy::PublicDirectory);
    assert!(saved.location.starts_with("/public/vid_"));
    assert!(saved.location.ends_with(".mp4"));
}

/// WHAT: Name collisions get a numeric suffix
/// WHY: Two saves in the same millisecond must not overwrite each other
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_taken_names_when_copying_then_suffixed_name_used() {
    // Given: The first two candidate names are refused as already existing
    let journal = Arc::new(Journal::default());
    let resolver = resolver_with(true, false, 2, Arc::clone(&journal));

    // When: Persisting
    let saved = resolver.persist(&artifact(), &context()).await.unwrap();

    // Then: Third candidate written, each name tried by the copy itself
    assert!(saved.location.ends_with("_2.mp4"));
    assert_eq!(journal.count_prefix("copy:"), 3);
    assert_eq!(saved.strategy, SaveStrategy::PublicDirectory);
}

/// WHAT: Exhausted plan reports every cause
/// WHY: The UI needs the underlying reason for the failed save
#[tokio::test]
async fn given_both_strategies_fail_when_persisting_then_persistence_failed() {
    // Given: Failing gallery and copy
    let journal = Arc::new(Journal::default());
    let resolver = resolver_with(true, true, 0, Arc::clone(&journal));

    // When: Persisting
    let result = resolver.persist(&artifact(), &context()).await;

    // Then: PersistenceFailed naming both strategies
    assert!(matches!(
        &result,
        Err(SessionError::PersistenceFailed { .. })
    ));
    if let Err(SessionError::PersistenceFailed { cause, .. }) = &result {
        assert!(cause.contains("media gallery: gallery quota exceeded"));
        assert!(cause.contains("public directory: Failed to copy"));
    }
    assert_eq!(journal.count_prefix("remove:"), 0);
}

/// WHAT: Fallback file names
/// WHY: Timestamp-based names keep the public directory collision-free
#[test]
fn given_millis_and_attempts_when_naming_then_vid_pattern() {
    // Given/When/Then: First attempt plain, later attempts suffixed
    assert_eq!(fallback_file_name(1_700_000_000_000, 0, "mp4"), "vid_1700000000000.mp4");
    assert_eq!(fallback_file_name(1_700_000_000_000, 3, "mov"), "vid_1700000000000_3.mov");
}

/// WHAT: Confirmation names quality, size and location
/// WHY: Shown to the user when a session is saved
#[test]
fn given_saved_location_when_formatting_then_message_has_quality_and_size() {
    // Given: A 2 MB save
    let saved = SavedLocation {
        strategy: SaveStrategy::PublicDirectory,
        location: "/public/vid_1.mp4".to_string(),
        size_bytes: 2 * 1024 * 1024,
    };

    // When: Formatting for 1080p
    let message = confirmation_message(&QualityProfile::P1080, &saved);

    // Then: Full message
    assert_eq!(message, "Video saved in 1080p (2.00 MB) to /public/vid_1.mp4");
}
