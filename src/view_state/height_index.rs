//! HeightIndex - O(log n) prefix sums via Fenwick tree
//!
//! Holds the stacked heights of one render column so the document position
//! of any item can be recovered without walking the column.
//!
//! Heights are stored in thousandths of a pixel (`i64`) so that repeated
//! updates never accumulate floating-point drift.
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `prefix_sum`: O(log n)
//! - `push`: O(log n), amortized O(n) on growth
//! - `total`: O(log n)
//! - `get`, `len`: O(1)

/// HeightIndex wraps a Fenwick tree for O(log n) prefix sum queries and updates.
///
/// # Invariants
/// - `heights.len() == len`
/// - `prefix_sum(i) == heights[0..=i].sum()`
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree backing storage; its length is the capacity.
    tree: Vec<i64>,
    /// Raw per-entry heights, for O(1) lookup and rebuild on growth.
    heights: Vec<i64>,
}

impl HeightIndex {
    /// Creates a new HeightIndex with the given initial capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feedwall::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::new(100);
    /// assert_eq!(index.len(), 0);
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    /// Height at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<i64> {
        self.heights.get(index).copied()
    }

    /// Sets the height at the given index.
    ///
    /// Returns the previous height, or `None` (and changes nothing) when
    /// `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feedwall::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(10);
    /// index.push(5);
    /// assert_eq!(index.set(0, 10), Some(5));
    /// assert_eq!(index.prefix_sum(0), 10);
    /// assert_eq!(index.set(3, 1), None);
    /// ```
    pub fn set(&mut self, index: usize, height: i64) -> Option<i64> {
        let current = *self.heights.get(index)?;
        let delta = height - current;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
            self.heights[index] = height;
        }
        Some(current)
    }

    /// Returns the cumulative height up to and including the given index.
    ///
    /// Indices past the end clamp to the total.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feedwall::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(10);
    /// index.push(3);
    /// index.push(4);
    /// index.push(5);
    /// assert_eq!(index.prefix_sum(0), 3);
    /// assert_eq!(index.prefix_sum(1), 7);
    /// assert_eq!(index.prefix_sum(2), 12);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> i64 {
        if self.heights.is_empty() {
            return 0;
        }
        let index = index.min(self.heights.len() - 1);
        fenwick::array::prefix_sum(&self.tree, index)
    }

    /// Cumulative height of all entries strictly before `index`.
    pub fn offset_of(&self, index: usize) -> i64 {
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// Returns the total cumulative height of all entries.
    pub fn total(&self) -> i64 {
        match self.heights.len() {
            0 => 0,
            n => self.prefix_sum(n - 1),
        }
    }

    /// Returns the number of entries in the index.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns true if the index contains no entries.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Appends a new entry with the given height and returns its index.
    ///
    /// Grows the backing storage if necessary. Growing rebuilds the tree,
    /// since nodes past the old capacity never saw the earlier updates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feedwall::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(1);
    /// index.push(5);
    /// index.push(3);
    /// index.push(2);
    /// assert_eq!(index.len(), 3);
    /// assert_eq!(index.total(), 10);
    /// ```
    pub fn push(&mut self, height: i64) -> usize {
        let idx = self.heights.len();
        self.heights.push(height);

        if idx >= self.tree.len() {
            let capacity = self.tree.len().max(1) * 2;
            self.rebuild(capacity.max(self.heights.len()));
        } else {
            fenwick::array::update(&mut self.tree, idx, height);
        }
        idx
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree.clear();
        self.tree.resize(capacity, 0);
        for (i, &h) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, i, h);
        }
    }
}
