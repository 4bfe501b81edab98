//! Signal coalescing.
//!
//! The host delivers discrete signals (scroll, resize, media change, animation
//! frame), each stamped with a monotonic `now_ms`. [`PassScheduler`] collapses
//! scroll and resize bursts into at most one visibility pass per frame, and
//! never two passes closer than the minimum interval. [`Debouncer`] holds
//! last-write-wins deadlines for per-key work such as media remeasures.

use crate::model::MediaHandle;
use crate::view_state::types::Viewport;
use std::collections::BTreeMap;

/// A host signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// The document scrolled to `top`.
    Scroll {
        /// New scroll offset.
        top: f64,
    },
    /// The viewport changed size.
    Resize {
        /// New dimensions.
        viewport: Viewport,
    },
    /// A watched media container finished a load or changed its children.
    MediaChanged(MediaHandle),
    /// An animation frame.
    Frame,
}

/// Throttle for the visibility pass.
///
/// A pass becomes due once `min_interval_ms` has passed both since the first
/// signal of the current burst and since the previous pass. Signals arriving
/// while a pass is pending only keep it pending. Waiting on the burst start
/// keeps a frame that lands between two close signals from running a pass
/// on the first of them when the previous pass is long past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassScheduler {
    min_interval_ms: u64,
    pending_since: Option<u64>,
    last_pass_ms: Option<u64>,
}

impl PassScheduler {
    /// Scheduler with the given floor between passes.
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            pending_since: None,
            last_pass_ms: None,
        }
    }

    /// Record a signal that invalidates visibility.
    pub fn note(&mut self, now_ms: u64) {
        self.pending_since.get_or_insert(now_ms);
    }

    /// Whether a pass is pending.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Whether the pending pass may run at `now_ms`.
    pub fn is_due(&self, now_ms: u64) -> bool {
        let Some(since) = self.pending_since else {
            return false;
        };
        let settled = now_ms.saturating_sub(since) >= self.min_interval_ms;
        let spaced = self
            .last_pass_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= self.min_interval_ms);
        settled && spaced
    }

    /// Record that a pass ran at `now_ms`. Clears any pending pass.
    pub fn ran(&mut self, now_ms: u64) {
        self.pending_since = None;
        self.last_pass_ms = Some(now_ms);
    }

    /// Time of the last pass.
    pub fn last_pass_ms(&self) -> Option<u64> {
        self.last_pass_ms
    }
}

/// Per-key deadlines, last write wins.
#[derive(Debug, Clone)]
pub struct Debouncer<K: Ord + Copy> {
    delay_ms: u64,
    deadlines: BTreeMap<K, u64>,
}

impl<K: Ord + Copy> Debouncer<K> {
    /// Debouncer with a quiet period of `delay_ms`.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadlines: BTreeMap::new(),
        }
    }

    /// (Re)schedule `key`, superseding any earlier deadline.
    pub fn schedule(&mut self, key: K, now_ms: u64) {
        self.deadlines
            .insert(key, now_ms.saturating_add(self.delay_ms));
    }

    /// Drop a scheduled key.
    pub fn cancel(&mut self, key: &K) {
        self.deadlines.remove(key);
    }

    /// Remove and return every key whose deadline has passed, in key order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<K> {
        let due: Vec<K> = self
            .deadlines
            .iter()
            .filter(|(_, &deadline)| deadline <= now_ms)
            .map(|(key, _)| *key)
            .collect();
        for key in &due {
            self.deadlines.remove(key);
        }
        due
    }

    /// Number of scheduled keys.
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
