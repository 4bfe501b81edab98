//! Media height bookkeeping.
//!
//! - [`HeightCache`]: last measured height per media container
//! - [`MonitoredMedia`]: materialized items whose media is not yet watched

use crate::model::{ItemId, MediaHandle};
use crate::view_state::types::Px;
use std::collections::{BTreeMap, HashMap};

/// Last measured height of each live media container.
#[derive(Debug, Clone, Default)]
pub struct HeightCache {
    heights: HashMap<MediaHandle, Px>,
}

impl HeightCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a measurement. Returns true when it differs from the cached one
    /// (or nothing was cached).
    pub fn record(&mut self, media: MediaHandle, height: Px) -> bool {
        let height = height.quantized();
        match self.heights.insert(media, height) {
            Some(previous) => previous != height,
            None => true,
        }
    }

    /// Cached height.
    pub fn get(&self, media: MediaHandle) -> Option<Px> {
        self.heights.get(&media).copied()
    }

    /// Drop the entry of a destroyed container.
    pub fn forget(&mut self, media: MediaHandle) {
        self.heights.remove(&media);
    }

    /// Media containers with a cached height.
    pub fn media(&self) -> impl Iterator<Item = MediaHandle> + '_ {
        self.heights.keys().copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

/// Items registered for height monitoring that have not started yet.
///
/// An entry leaves the registry as soon as monitoring starts; watching then
/// continues through the observers owned by the item's bindings.
#[derive(Debug, Clone, Default)]
pub struct MonitoredMedia {
    pending: BTreeMap<ItemId, Vec<MediaHandle>>,
}

impl MonitoredMedia {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the media containers of a freshly materialized item.
    /// Items without media are not registered.
    pub fn register(&mut self, id: ItemId, media: Vec<MediaHandle>) {
        if !media.is_empty() {
            self.pending.insert(id, media);
        }
    }

    /// Remove and return an entry to start monitoring it.
    pub fn take(&mut self, id: ItemId) -> Option<Vec<MediaHandle>> {
        self.pending.remove(&id)
    }

    /// Whether `id` is waiting to be monitored.
    pub fn contains(&self, id: ItemId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Pending ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.pending.keys().copied()
    }

    /// Number of pending items.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
