//! Feed input source.
//!
//! The [`ItemStore`] holds the full ordered dataset and hands it out in
//! batches from an advancing read offset. An exhausted store keeps returning
//! empty batches; callers treat that as "no more data", never as an error.

use crate::model::error::InputError;
use crate::model::{Item, ItemId};
use serde::Deserialize;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Accepted top-level shapes of a feed file.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeedFile {
    /// A bare array of items.
    Items(Vec<Item>),
    /// The page-generator payload, which embeds items under `tweets`.
    Wrapped { tweets: Vec<Item> },
}

/// Ordered, append-only item dataset with a monotonically advancing read offset.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    offset: usize,
}

/// Items returned by one [`ItemStore::load_next_batch`] call.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    start: usize,
    items: &'a [Item],
}

impl<'a> Batch<'a> {
    /// Ids covered by this batch, in ascending order.
    pub fn ids(&self) -> Range<usize> {
        self.start..self.start + self.items.len()
    }

    /// Number of items in the batch.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the store was already exhausted.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate `(id, item)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &'a Item)> + 'a {
        let start = self.start;
        let items: &'a [Item] = self.items;
        items
            .iter()
            .enumerate()
            .map(move |(i, item)| (ItemId::new(start + i), item))
    }
}

impl ItemStore {
    /// Create a store over an in-memory dataset.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, offset: 0 }
    }

    /// Decode a feed from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Json` when the text is neither an item array nor an
    /// object with a `tweets` array.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let items = match serde_json::from_str::<FeedFile>(json)? {
            FeedFile::Items(items) | FeedFile::Wrapped { tweets: items } => items,
        };
        debug!(count = items.len(), "Decoded feed");
        Ok(Self::new(items))
    }

    /// Load a feed file from disk.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the path does not exist,
    /// `InputError::Io` if it cannot be read, `InputError::Json` if it cannot
    /// be decoded.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Read the next `n` items from the offset and advance past them.
    ///
    /// Returns fewer than `n` items near the end and an empty batch once the
    /// store is exhausted.
    pub fn load_next_batch(&mut self, n: usize) -> Batch<'_> {
        let start = self.offset;
        let end = start.saturating_add(n).min(self.items.len());
        self.offset = end;
        Batch {
            start,
            items: &self.items[start..end],
        }
    }

    /// Item by id, or `None` for ids beyond the dataset.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.get())
    }

    /// Number of items already handed out.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total number of items in the dataset.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the dataset has no items at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True once every item has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.items.len()
    }
}
