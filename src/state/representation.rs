//! Per-item representation.
//!
//! Every rendered item has exactly one representation. The materialized one
//! owns everything bound to its container, so demotion can release it all
//! explicitly.

use super::toggle::LanguageToggle;
use crate::model::{
    ContainerHandle, ListenerHandle, MediaHandle, PlaceholderHandle, VideoHandle, WatchHandle,
};
use crate::view_state::types::Size;

/// Resources attached to a materialized container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    /// Feature listeners.
    pub listeners: Vec<ListenerHandle>,
    /// Load and child-list observers on media containers.
    pub watches: Vec<WatchHandle>,
    /// Every video element, autoplaying or not.
    pub videos: Vec<VideoHandle>,
    /// Translation toggle, for items that have a translation.
    pub toggle: Option<LanguageToggle>,
}

impl Bindings {
    /// True while the language toggle animates.
    pub fn is_busy(&self) -> bool {
        self.toggle.is_some_and(|toggle| toggle.is_busy())
    }
}

/// How an item is currently present in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    /// Full markup with live resources.
    Materialized {
        /// The item's container.
        container: ContainerHandle,
        /// Media containers inside it.
        media: Vec<MediaHandle>,
        /// Attached resources.
        bindings: Bindings,
    },
    /// Fixed-size stand-in.
    Placeholder {
        /// The placeholder block.
        handle: PlaceholderHandle,
        /// Size of the container it replaced.
        size: Size,
    },
}

impl Representation {
    /// True for [`Representation::Materialized`].
    pub fn is_materialized(&self) -> bool {
        matches!(self, Representation::Materialized { .. })
    }

    /// Container handle when materialized.
    pub fn container(&self) -> Option<ContainerHandle> {
        match self {
            Representation::Materialized { container, .. } => Some(*container),
            Representation::Placeholder { .. } => None,
        }
    }

    /// Recorded size when a placeholder.
    pub fn placeholder_size(&self) -> Option<Size> {
        match self {
            Representation::Placeholder { size, .. } => Some(*size),
            Representation::Materialized { .. } => None,
        }
    }
}

/// Result of resolving an item id to its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerLookup {
    /// The item is materialized in this container.
    Materialized(ContainerHandle),
    /// The item is currently a placeholder and has no container.
    Placeholder,
    /// The id was never rendered.
    Unknown,
}

impl ContainerLookup {
    /// The container, if any.
    pub fn handle(self) -> Option<ContainerHandle> {
        match self {
            ContainerLookup::Materialized(handle) => Some(handle),
            _ => None,
        }
    }
}
