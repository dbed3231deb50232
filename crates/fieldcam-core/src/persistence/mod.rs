//! Durable, user-visible storage of compressed recordings.

mod platform;
mod primitives;
mod resolver;

pub use {
    platform::{ANDROID_SCOPED_MEDIA_API_LEVEL, Platform, PlatformContext, SaveStrategy},
    primitives::{FileStore, MediaGallery, PrimitiveError, TokioFileStore},
    resolver::{PersistenceResolver, SavedLocation, confirmation_message},
};

#[cfg(test)]
pub(crate) use resolver::fallback_file_name;
