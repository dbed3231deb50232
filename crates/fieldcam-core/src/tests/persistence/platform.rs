use crate::{Platform, PlatformContext, SaveStrategy};

use std::path::PathBuf;

fn plan_for(platform: Platform) -> Vec<SaveStrategy> {
    PlatformContext {
        platform,
        public_video_dir: PathBuf::from("/videos"),
    }
    .save_plan()
    .to_vec()
}

/// WHAT: Save plan per platform and version
/// WHY: Android below API 33 cannot use the scoped gallery primitive
#[test]
fn given_platforms_when_planning_then_gallery_first_except_legacy_android() {
    // Given/When: Plans for each platform
    let gallery_then_copy = vec![SaveStrategy::MediaGallery, SaveStrategy::PublicDirectory];

    // Then: Gallery is primary everywhere but Android < 33
    assert_eq!(plan_for(Platform::Android { api_level: 33 }), gallery_then_copy);
    assert_eq!(plan_for(Platform::Android { api_level: 35 }), gallery_then_copy);
    assert_eq!(plan_for(Platform::Ios), gallery_then_copy);
    assert_eq!(plan_for(Platform::Desktop), gallery_then_copy);
    assert_eq!(
        plan_for(Platform::Android { api_level: 32 }),
        vec![SaveStrategy::PublicDirectory]
    );
}
