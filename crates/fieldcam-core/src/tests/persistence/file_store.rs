use crate::{
    CompressedArtifact, FileStore, MediaGallery, PersistenceResolver, Platform, PlatformContext,
    PrimitiveError, SaveStrategy, TokioFileStore,
};

use std::{path::Path, sync::Arc};

use async_trait::async_trait;

struct NoGallery;

#[async_trait]
impl MediaGallery for NoGallery {
    async fn save_video(&self, _path: &Path) -> Result<String, PrimitiveError> {
        Err("media gallery unavailable".into())
    }
}

/// WHAT: Tokio file store copies, probes and removes real files
/// WHY: The fallback copy and raw reclaim rely on it
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_temp_dir_when_using_file_store_then_operations_hit_disk() {
    // Given: A file in a temp dir
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("raw.mov");
    std::fs::write(&src, b"frames").unwrap();
    let store = TokioFileStore;

    // When: Ensuring a nested dir, copying and removing the source
    let nested = dir.path().join("a").join("b");
    store.ensure_dir(&nested).await.unwrap();
    let dest = nested.join("copy.mov");
    let copied = store.copy(&src, &dest).await.unwrap();
    store.remove(&src).await.unwrap();

    // Then: Copy present, source gone
    assert_eq!(copied, 6);
    assert!(dest.exists());
    assert!(!src.exists());
}

/// WHAT: Copy never overwrites an existing destination
/// WHY: A file that appears under the chosen name must survive the fallback copy
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_existing_destination_when_copying_then_already_exists_and_untouched() {
    // Given: A source clip and a destination that already holds other data
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("clip.mp4");
    std::fs::write(&src, b"new frames").unwrap();
    let dest = dir.path().join("vid_1.mp4");
    std::fs::write(&dest, b"keep").unwrap();

    // When: Copying onto it
    let result = TokioFileStore.copy(&src, &dest).await;

    // Then: AlreadyExists, previous content intact
    assert_eq!(
        result.unwrap_err().kind(),
        std::io::ErrorKind::AlreadyExists
    );
    assert_eq!(std::fs::read(&dest).unwrap(), b"keep");
}

/// WHAT: Canonical paths resolve `.` components
/// WHY: The raw reclaim compares canonical paths against the compressed output
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_dotted_path_when_canonicalizing_then_matches_plain_path() {
    // Given: One file reached by two spellings
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("clip.mp4");
    std::fs::write(&plain, b"frames").unwrap();
    let dotted = dir.path().join(".").join("clip.mp4");

    // When: Canonicalizing both
    let a = TokioFileStore.canonicalize(&plain).await.unwrap();
    let b = TokioFileStore.canonicalize(&dotted).await.unwrap();

    // Then: Same path
    assert_eq!(a, b);
}

/// WHAT: Fallback copy on a real filesystem creates the public dir
/// WHY: End-to-end check of the desktop save path
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_missing_public_dir_when_persisting_then_created_and_file_copied() {
    // Given: A compressed file and a public dir that does not exist yet
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("clip_480p.mp4");
    std::fs::write(&src, vec![0u8; 1024]).unwrap();
    let public = dir.path().join("Movies").join("FieldCam");
    let resolver = PersistenceResolver::new(Arc::new(NoGallery), Arc::new(TokioFileStore));
    let context = PlatformContext {
        platform: Platform::Desktop,
        public_video_dir: public.clone(),
    };
    let artifact = CompressedArtifact {
        path: src.clone(),
        size_bytes: 1024,
    };

    // When: Persisting
    let saved = resolver.persist(&artifact, &context).await.unwrap();

    // Then: Copied into the new directory, original left in place
    assert_eq!(saved.strategy, SaveStrategy::PublicDirectory);
    let dest = std::path::PathBuf::from(&saved.location);
    assert_eq!(dest.parent(), Some(public.as_path()));
    assert_eq!(std::fs::read(&dest).unwrap().len(), 1024);
    assert!(src.exists());
}
