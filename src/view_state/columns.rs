//! Greedy column balancer.
//!
//! Assigns each newly loaded item to the column with the fewest items so far.
//! This balances item *count*, not visual height; height differences between
//! columns persist and are expected. Counts never decrease: demoting an item
//! to a placeholder keeps it in its column.

use crate::model::ColumnIndex;

/// Per-column occupancy counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBalancer {
    ends: Vec<usize>,
}

impl ColumnBalancer {
    /// Balancer for `columns` empty columns. At least one column is kept.
    pub fn new(columns: usize) -> Self {
        Self {
            ends: vec![0; columns.max(1)],
        }
    }

    /// Column the next item should go to: `argmin(ends)`, lowest index on ties.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feedwall::view_state::columns::ColumnBalancer;
    /// let mut balancer = ColumnBalancer::new(3);
    /// let col = balancer.assign();
    /// assert_eq!(col.get(), 0);
    /// balancer.record(col);
    /// assert_eq!(balancer.assign().get(), 1);
    /// ```
    pub fn assign(&self) -> ColumnIndex {
        let (index, _) = self
            .ends
            .iter()
            .enumerate()
            .fold((0, usize::MAX), |best, (i, &count)| {
                if count < best.1 {
                    (i, count)
                } else {
                    best
                }
            });
        ColumnIndex::new(index)
    }

    /// Count one more item in `column`. Out-of-range columns are ignored.
    pub fn record(&mut self, column: ColumnIndex) {
        if let Some(end) = self.ends.get_mut(column.get()) {
            *end += 1;
        }
    }

    /// Assign and record in one step.
    pub fn place(&mut self) -> ColumnIndex {
        let column = self.assign();
        self.record(column);
        column
    }

    /// Current counters, one per column.
    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.ends.len()
    }
}
