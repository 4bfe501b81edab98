//! Viewport-intersection watcher for autoplaying videos.
//!
//! One watcher is shared by the whole feed. Each registered video is owned by
//! a materialized item; demotion must unobserve it before the container goes
//! away, otherwise the watcher would keep a detached element.

use crate::model::{ItemId, VideoHandle};
use crate::view_state::types::Extent;
use std::collections::BTreeMap;

/// Edge reported when a video crosses the intersection threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Became intersecting.
    Enter,
    /// Stopped intersecting.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Observed {
    owner: ItemId,
    intersecting: Option<bool>,
}

/// Registered videos and their last intersection state.
#[derive(Debug, Clone)]
pub struct VideoWatcher {
    threshold: f64,
    observed: BTreeMap<VideoHandle, Observed>,
}

impl VideoWatcher {
    /// Watcher that counts a video as intersecting once `threshold` of its
    /// height is inside the viewport.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: BTreeMap::new(),
        }
    }

    /// Intersection threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Register `video`, owned by item `owner`. Re-registering keeps the
    /// current state.
    pub fn observe(&mut self, video: VideoHandle, owner: ItemId) {
        self.observed.entry(video).or_insert(Observed {
            owner,
            intersecting: None,
        });
    }

    /// Unregister `video`. Returns false when it was not registered.
    pub fn unobserve(&mut self, video: VideoHandle) -> bool {
        self.observed.remove(&video).is_some()
    }

    /// Whether `video` is registered.
    pub fn is_observed(&self, video: VideoHandle) -> bool {
        self.observed.contains_key(&video)
    }

    /// Registered videos with their owners, in handle order.
    pub fn observed(&self) -> Vec<(VideoHandle, ItemId)> {
        self.observed
            .iter()
            .map(|(video, observed)| (*video, observed.owner))
            .collect()
    }

    /// Registered videos owned by `owner`.
    pub fn owned_by(&self, owner: ItemId) -> Vec<VideoHandle> {
        self.observed
            .iter()
            .filter(|(_, observed)| observed.owner == owner)
            .map(|(video, _)| *video)
            .collect()
    }

    /// Number of registered videos.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Feed the visible fraction of `video`.
    ///
    /// Returns the crossing when the state changed. The first update after
    /// registration always reports, like an observer's initial callback.
    pub fn update(&mut self, video: VideoHandle, ratio: f64) -> Option<Crossing> {
        let observed = self.observed.get_mut(&video)?;
        let intersecting = ratio > 0.0 && ratio >= self.threshold;
        if observed.intersecting == Some(intersecting) {
            return None;
        }
        observed.intersecting = Some(intersecting);
        Some(if intersecting {
            Crossing::Enter
        } else {
            Crossing::Leave
        })
    }
}

/// Fraction of `target` inside `viewport`, in `[0, 1]`.
///
/// A zero-height target counts as fully visible when its top edge lies
/// inside the viewport.
pub fn intersection_ratio(target: &Extent, viewport: &Extent) -> f64 {
    let height = target.height();
    if height <= 0.0 {
        let inside = target.top >= viewport.top && target.top <= viewport.bottom;
        return if inside { 1.0 } else { 0.0 };
    }
    (target.overlap(viewport) / height).clamp(0.0, 1.0)
}
