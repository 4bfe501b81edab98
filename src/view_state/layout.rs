//! Document layout of the multi-column feed.
//!
//! Each column stacks its items top to bottom with a fixed gap between them.
//! An item's document position is the sum of the heights stacked above it in
//! its column, recovered in O(log n) from a per-column [`HeightIndex`].
//!
//! # Invariants
//! - Items are pushed in ascending id order, so slots are indexed by id.
//! - `extent(id).top == offset_of(row) + row * gap` within the item's column.
//! - A placeholder occupies its item's slot with the placeholder's height, so
//!   demotion never moves any other item.

use super::height_index::HeightIndex;
use super::types::{Extent, Px};
use crate::model::{ColumnIndex, ItemId};

/// Where an item sits: its column and its row within that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Column the item was appended to.
    pub column: ColumnIndex,
    /// 0-based position within the column.
    pub row: usize,
}

/// Column stacks and item positions for the whole feed.
#[derive(Debug, Clone)]
pub struct FeedLayout {
    columns: Vec<HeightIndex>,
    slots: Vec<Slot>,
    gap: i64,
}

impl FeedLayout {
    /// Empty layout with `columns` columns (at least one) and `gap` between items.
    pub fn new(columns: usize, gap: Px) -> Self {
        Self {
            columns: (0..columns.max(1)).map(|_| HeightIndex::new(64)).collect(),
            slots: Vec::new(),
            gap: gap.to_millipx(),
        }
    }

    /// Append `id` at the bottom of `column`.
    ///
    /// Returns `None` and changes nothing when `id` is not the next id in
    /// sequence or the column does not exist.
    pub fn push(&mut self, id: ItemId, column: ColumnIndex, height: Px) -> Option<Slot> {
        if id.get() != self.slots.len() {
            return None;
        }
        let stack = self.columns.get_mut(column.get())?;
        let row = stack.push(height.to_millipx());
        let slot = Slot { column, row };
        self.slots.push(slot);
        Some(slot)
    }

    /// Slot of a laid-out item.
    pub fn slot(&self, id: ItemId) -> Option<Slot> {
        self.slots.get(id.get()).copied()
    }

    /// Current height recorded for `id`.
    pub fn height(&self, id: ItemId) -> Option<Px> {
        let slot = self.slot(id)?;
        self.columns[slot.column.get()]
            .get(slot.row)
            .map(Px::from_millipx)
    }

    /// Replace the height recorded for `id`, returning the previous one.
    pub fn set_height(&mut self, id: ItemId, height: Px) -> Option<Px> {
        let slot = self.slot(id)?;
        self.columns[slot.column.get()]
            .set(slot.row, height.to_millipx())
            .map(Px::from_millipx)
    }

    /// Vertical extent of `id` in document coordinates.
    pub fn extent(&self, id: ItemId) -> Option<Extent> {
        let slot = self.slot(id)?;
        let stack = &self.columns[slot.column.get()];
        let top = stack.offset_of(slot.row) + self.gap * slot.row as i64;
        let height = stack.get(slot.row)?;
        Some(Extent::new(top as f64 / 1000.0, height as f64 / 1000.0))
    }

    /// Bottom edge of `column`, including the gap after every item.
    pub fn column_bottom(&self, column: ColumnIndex) -> Option<f64> {
        let stack = self.columns.get(column.get())?;
        let bottom = stack.total() + self.gap * stack.len() as i64;
        Some(bottom as f64 / 1000.0)
    }

    /// Bottom edge of the shortest column: where the next load is most needed.
    pub fn shortest_column_bottom(&self) -> f64 {
        (0..self.columns.len())
            .filter_map(|c| self.column_bottom(ColumnIndex::new(c)))
            .fold(f64::INFINITY, f64::min)
    }

    /// Number of laid-out items.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True before the first item is laid out.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }
}
