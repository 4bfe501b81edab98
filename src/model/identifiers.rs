//! Core identifier newtypes.
//!
//! Item identity is positional: an `ItemId` is the item's index in the
//! store. Host handles are opaque tokens issued by a [`Surface`] and only
//! meaningful to the surface that issued them.
//!
//! [`Surface`]: crate::view::Surface

use std::fmt;

/// Stable, position-derived identity of an item. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemId(usize);

impl ItemId {
    /// Create an id from a raw 0-based store position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw 0-based store position.
    pub fn get(&self) -> usize {
        self.0
    }

    /// The id that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<usize> for ItemId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a render column. 0 is the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    /// Create a column index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw column position.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col{}", self.0)
    }
}

macro_rules! host_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw token issued by a surface.
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw token.
            pub fn raw(&self) -> u64 {
                self.0
            }
        }
    };
}

host_handle!(
    /// A materialized item container in the host tree.
    ContainerHandle
);
host_handle!(
    /// A fixed-size placeholder block standing in for a demoted item.
    PlaceholderHandle
);
host_handle!(
    /// A media container (group of photos/videos) inside a materialized item.
    MediaHandle
);
host_handle!(
    /// A video element inside a media container.
    VideoHandle
);
host_handle!(
    /// Load/mutation observers attached to one media container.
    WatchHandle
);
host_handle!(
    /// An event listener attached to an element of a materialized container.
    ListenerHandle
);
