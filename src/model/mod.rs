//! Domain model types (pure).
//!
//! Feed items, identifiers and the error taxonomy.

pub mod error;
pub mod identifiers;
pub mod item;

// Re-export for convenience
pub use error::{AppError, InputError, PlaybackError};
pub use identifiers::{
    ColumnIndex, ContainerHandle, ItemId, ListenerHandle, MediaHandle, PlaceholderHandle,
    VideoHandle, WatchHandle,
};
pub use item::{Author, Avatar, Card, Content, Item, Media, MediaKind, MEDIA_UNAVAILABLE};
