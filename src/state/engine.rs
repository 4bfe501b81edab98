//! The virtualization engine.
//!
//! `FeedEngine` owns every piece of per-feed state: the item store, column
//! counters, document layout, one [`Representation`] per rendered id, the
//! visible set, the media height bookkeeping and the shared video watcher.
//! Hosts forward signals with an explicit `now_ms`; nothing here reads a
//! clock or spawns work.
//!
//! # Pass order
//!
//! A visibility pass first starts height monitoring for registered items near
//! the viewport, then walks every rendered id in ascending order deciding
//! promotion or demotion, then updates video intersections. Positions are
//! read from the layout as the walk proceeds, so a height change caused by a
//! swap is seen by every later item in the same column within the same pass.
//! A promoted item is marked visible only if its re-measured extent still
//! overlaps the window; one that shrank out of it stays unmarked and is left
//! alone. One pass therefore reaches a fixed point and an immediate second
//! pass performs no swaps.
//!
//! # Error handling
//!
//! No operation returns an error. Missing elements, an exhausted store,
//! rejected playback and out-of-range ids are all silent no-ops (logged at
//! `trace`). A missed transition is corrected by the next pass.

use super::representation::{Bindings, ContainerLookup, Representation};
use super::resources::{HeightCache, MonitoredMedia};
use super::scheduler::{Debouncer, PassScheduler, Signal};
use super::toggle::LanguageToggle;
use super::video::{intersection_ratio, Crossing, VideoWatcher};
use crate::config::EngineConfig;
use crate::model::{ContainerHandle, ItemId, MediaHandle, VideoHandle};
use crate::source::ItemStore;
use crate::view::{DisplayMode, Fragment, ItemRenderer, ListenerKind, RenderContext, Surface};
use crate::view_state::{
    ColumnBalancer, Extent, FeedLayout, Px, Size, Viewport, VisibilityWindow,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, trace};

/// Lifecycle phase of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Constructed, `init` not yet called.
    Created,
    /// Reacting to signals.
    Running,
    /// Resources released; signals are ignored.
    TornDown,
}

/// Cumulative counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EngineStats {
    /// Placeholder to materialized swaps.
    pub promotions: u64,
    /// Materialized to placeholder swaps.
    pub demotions: u64,
    /// Visibility passes run.
    pub passes: u64,
    /// Non-empty batches loaded.
    pub batches_loaded: u64,
    /// Items appended to columns.
    pub items_loaded: u64,
    /// Item heights that changed after a remeasure.
    pub remeasures: u64,
    /// Successful playback starts.
    pub videos_started: u64,
    /// Playback starts the environment rejected.
    pub playback_failures: u64,
}

/// Swaps performed by one visibility pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PassOutcome {
    /// Items promoted.
    pub promoted: usize,
    /// Items demoted.
    pub demoted: usize,
}

impl PassOutcome {
    /// Total swaps.
    pub fn swaps(&self) -> usize {
        self.promoted + self.demoted
    }
}

/// Viewport-driven virtualization engine for one feed.
pub struct FeedEngine<S, R> {
    config: EngineConfig,
    store: ItemStore,
    surface: S,
    renderer: R,
    balancer: ColumnBalancer,
    layout: FeedLayout,
    /// Indexed by id; the rendered set is `0..len`.
    representations: Vec<Representation>,
    visible: BTreeSet<ItemId>,
    heights: HeightCache,
    monitored: MonitoredMedia,
    media_owner: HashMap<MediaHandle, ItemId>,
    remeasures: Debouncer<MediaHandle>,
    videos: VideoWatcher,
    scheduler: PassScheduler,
    viewport: Viewport,
    scroll_top: f64,
    mode: DisplayMode,
    phase: Phase,
    stats: EngineStats,
}

impl<S: Surface, R: ItemRenderer> FeedEngine<S, R> {
    /// Create an engine. Nothing is rendered until [`FeedEngine::init`].
    pub fn new(store: ItemStore, surface: S, renderer: R, config: EngineConfig) -> Self {
        Self {
            balancer: ColumnBalancer::new(config.columns),
            layout: FeedLayout::new(config.columns, Px::new(config.item_gap)),
            remeasures: Debouncer::new(config.remeasure_debounce_ms),
            videos: VideoWatcher::new(config.video_threshold),
            scheduler: PassScheduler::new(config.min_pass_interval_ms),
            representations: Vec::new(),
            visible: BTreeSet::new(),
            heights: HeightCache::new(),
            monitored: MonitoredMedia::new(),
            media_owner: HashMap::new(),
            viewport: Viewport::default(),
            scroll_top: 0.0,
            mode: DisplayMode::default(),
            phase: Phase::Created,
            stats: EngineStats::default(),
            config,
            store,
            surface,
            renderer,
        }
    }

    // ===== Lifecycle =====

    /// Load the first batch and run the first pass.
    ///
    /// Only the first call has an effect.
    pub fn init(&mut self, viewport: Viewport, now_ms: u64) {
        if self.phase != Phase::Created {
            trace!(phase = ?self.phase, "init ignored");
            return;
        }
        self.phase = Phase::Running;
        self.viewport = viewport;
        self.load_batch(now_ms);
        self.evaluate_visibility(now_ms);
        info!(
            items = self.store.len(),
            rendered = self.rendered_count(),
            columns = self.layout.columns(),
            "feed engine initialized"
        );
    }

    /// Release every materialized item's resources and stop reacting to signals.
    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        for index in 0..self.representations.len() {
            let id = ItemId::new(index);
            if let Representation::Materialized {
                media, bindings, ..
            } = &mut self.representations[index]
            {
                let media = std::mem::take(media);
                let bindings = std::mem::take(bindings);
                self.release(id, &media, bindings);
            }
        }
        self.remeasures = Debouncer::new(self.config.remeasure_debounce_ms);
        self.visible.clear();
        self.phase = Phase::TornDown;
        info!(stats = ?self.stats, "feed engine torn down");
    }

    fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    // ===== Signals =====

    /// Dispatch a host signal.
    pub fn handle(&mut self, signal: Signal, now_ms: u64) {
        match signal {
            Signal::Scroll { top } => self.on_scroll(top, now_ms),
            Signal::Resize { viewport } => self.on_resize(viewport, now_ms),
            Signal::MediaChanged(media) => self.on_media_changed(media, now_ms),
            Signal::Frame => self.on_frame(now_ms),
        }
    }

    /// The document scrolled to `top`.
    pub fn on_scroll(&mut self, top: f64, now_ms: u64) {
        if !self.is_running() {
            return;
        }
        self.scroll_top = if top.is_finite() { top.max(0.0) } else { 0.0 };
        self.scheduler.note(now_ms);
        self.maybe_load_more(now_ms);
    }

    /// The viewport changed size. Watched media is remeasured after the
    /// debounce period.
    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) {
        if !self.is_running() {
            return;
        }
        self.viewport = viewport;
        self.scheduler.note(now_ms);
        let watched: Vec<MediaHandle> = self.heights.media().collect();
        for media in watched {
            self.remeasures.schedule(media, now_ms);
        }
    }

    /// A media container reported a load or child-list change.
    pub fn on_media_changed(&mut self, media: MediaHandle, now_ms: u64) {
        if !self.is_running() {
            return;
        }
        if !self.media_owner.contains_key(&media) {
            trace!(?media, "change on released media ignored");
            return;
        }
        self.remeasures.schedule(media, now_ms);
    }

    /// An animation frame: run due remeasures, the pending pass if due, and
    /// the load check.
    pub fn on_frame(&mut self, now_ms: u64) {
        if !self.is_running() {
            return;
        }
        self.run_due_remeasures(now_ms);
        if self.scheduler.is_due(now_ms) {
            self.evaluate_visibility(now_ms);
        } else {
            self.update_videos();
        }
        self.maybe_load_more(now_ms);
    }

    // ===== Global display mode and language toggle =====

    /// Change the global display mode. Applied without animation to every
    /// materialized item with a translation; placeholders pick it up on
    /// promotion.
    pub fn set_display_mode(&mut self, mode: DisplayMode, now_ms: u64) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if !self.is_running() {
            return;
        }
        let mut applied = 0usize;
        for index in 0..self.representations.len() {
            let Representation::Materialized {
                container,
                bindings,
                ..
            } = &mut self.representations[index]
            else {
                continue;
            };
            let Some(toggle) = bindings.toggle.as_mut() else {
                continue;
            };
            *toggle = LanguageToggle::new(mode);
            let container = *container;
            self.surface.apply_display_mode(container, mode, false);
            self.refresh_height(ItemId::new(index), now_ms);
            applied += 1;
        }
        debug!(translation_shown = mode.translation_shown, applied, "display mode changed");
    }

    /// Current global display mode.
    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Start the language toggle animation of one item.
    ///
    /// Returns false when the item is not materialized, has no translation,
    /// or is already animating.
    pub fn toggle_language(&mut self, id: ItemId) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(Representation::Materialized {
            container,
            bindings,
            ..
        }) = self.representations.get_mut(id.get())
        else {
            trace!(%id, "language toggle on non-materialized item ignored");
            return false;
        };
        let Some(target) = bindings.toggle.as_mut().and_then(LanguageToggle::start) else {
            return false;
        };
        let container = *container;
        self.surface
            .apply_display_mode(container, target.as_mode(), true);
        debug!(%id, ?target, "language toggle started");
        true
    }

    /// End the language toggle animation of one item and remeasure it.
    pub fn finish_language_toggle(&mut self, id: ItemId, now_ms: u64) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(Representation::Materialized { bindings, .. }) =
            self.representations.get_mut(id.get())
        else {
            return false;
        };
        if bindings
            .toggle
            .as_mut()
            .and_then(LanguageToggle::finish)
            .is_none()
        {
            return false;
        }
        self.refresh_height(id, now_ms);
        true
    }

    // ===== Visibility =====

    /// Run a full pass now, regardless of the scheduler.
    ///
    /// Starts due height monitors, promotes and demotes in ascending id
    /// order, then updates video intersections.
    pub fn evaluate_visibility(&mut self, now_ms: u64) -> PassOutcome {
        if !self.is_running() {
            return PassOutcome::default();
        }
        self.media_pass(now_ms);
        let outcome = self.visibility_pass();
        self.update_videos();
        self.scheduler.ran(now_ms);
        self.stats.passes += 1;
        trace!(
            promoted = outcome.promoted,
            demoted = outcome.demoted,
            scroll_top = self.scroll_top,
            "visibility pass"
        );
        outcome
    }

    fn visibility_pass(&mut self) -> PassOutcome {
        let window = VisibilityWindow::around(
            self.scroll_top,
            self.viewport,
            self.config.extra_top,
            self.config.extra_bottom,
        );
        let mut outcome = PassOutcome::default();

        for index in 0..self.representations.len() {
            let id = ItemId::new(index);
            let Some(extent) = self.layout.extent(id) else {
                continue;
            };
            let inside = window.contains(&extent);
            let materialized = self.representations[index].is_materialized();

            match (materialized, inside) {
                (true, true) => {
                    self.visible.insert(id);
                }
                (false, true) => {
                    if self.promote(id) {
                        outcome.promoted += 1;
                        let still_inside = self
                            .layout
                            .extent(id)
                            .is_some_and(|extent| window.contains(&extent));
                        if still_inside {
                            self.visible.insert(id);
                        } else {
                            self.visible.remove(&id);
                            trace!(%id, "promoted item shrank out of the window");
                        }
                    }
                }
                (true, false) => {
                    if self.visible.contains(&id) && self.demote(id) {
                        self.visible.remove(&id);
                        outcome.demoted += 1;
                    }
                }
                (false, false) => {
                    self.visible.remove(&id);
                }
            }
        }
        outcome
    }

    fn demote(&mut self, id: ItemId) -> bool {
        let Some(Representation::Materialized {
            container,
            media,
            bindings,
        }) = self.representations.get_mut(id.get())
        else {
            trace!(%id, "demote skipped: not materialized");
            return false;
        };
        let container = *container;
        if bindings.is_busy() || self.surface.is_busy(container) {
            trace!(%id, "demote deferred: container busy");
            return false;
        }
        let Some(size) = self.surface.measure(container) else {
            trace!(%id, "demote skipped: container missing");
            return false;
        };
        let media = std::mem::take(media);
        let bindings = std::mem::take(bindings);
        self.release(id, &media, bindings);

        let Some(handle) = self.surface.swap_to_placeholder(container, size) else {
            trace!(%id, "demote failed: container left the tree, rebinding");
            self.rebind(id, container);
            return false;
        };
        self.representations[id.get()] = Representation::Placeholder { handle, size };
        self.layout.set_height(id, size.height);
        self.stats.demotions += 1;
        debug!(%id, height = size.height.get(), "demoted");
        true
    }

    fn promote(&mut self, id: ItemId) -> bool {
        let Some(Representation::Placeholder { handle, .. }) = self.representations.get(id.get())
        else {
            trace!(%id, "promote skipped: not a placeholder");
            return false;
        };
        let handle = *handle;
        let Some(item) = self.store.get(id) else {
            trace!(%id, "promote skipped: id out of range");
            return false;
        };
        let fragment = self.renderer.render(item, id, RenderContext::TOP_LEVEL);
        let Some(container) = self.surface.swap_to_container(handle, id, &fragment) else {
            trace!(%id, "promote skipped: placeholder missing");
            return false;
        };
        let (media, bindings, size) = self.bind(id, container, &fragment);
        self.representations[id.get()] = Representation::Materialized {
            container,
            media,
            bindings,
        };
        self.layout.set_height(id, size.height);
        self.stats.promotions += 1;
        debug!(%id, height = size.height.get(), "promoted");
        true
    }

    /// Restore the bindings of a container whose swap failed after release.
    fn rebind(&mut self, id: ItemId, container: ContainerHandle) {
        let Some(item) = self.store.get(id) else {
            return;
        };
        let fragment = self.renderer.render(item, id, RenderContext::TOP_LEVEL);
        let (media, bindings, _) = self.bind(id, container, &fragment);
        self.representations[id.get()] = Representation::Materialized {
            container,
            media,
            bindings,
        };
    }

    /// Attach listeners, register media and videos, apply the display mode
    /// and measure a freshly built container.
    fn bind(
        &mut self,
        id: ItemId,
        container: ContainerHandle,
        fragment: &Fragment,
    ) -> (Vec<MediaHandle>, Bindings, Size) {
        if self.mode.translation_shown && fragment.has_translation() {
            self.surface.apply_display_mode(container, self.mode, false);
        }

        let mut bindings = Bindings::default();
        for kind in ListenerKind::ALL {
            if let Some(listener) = self.surface.attach_listener(container, kind) {
                bindings.listeners.push(listener);
            }
        }

        let media = self.surface.media_containers(container);
        for handle in &media {
            self.media_owner.insert(*handle, id);
        }
        self.monitored.register(id, media.clone());

        for video in self.surface.videos(container) {
            bindings.videos.push(video.handle);
            if video.autoplay {
                self.videos.observe(video.handle, id);
            }
        }

        if fragment.has_translation() {
            bindings.toggle = Some(LanguageToggle::new(self.mode));
        }

        let size = self.surface.measure(container).unwrap_or_default();
        (media, bindings, size)
    }

    /// Detach and release everything a materialized item owned.
    fn release(&mut self, id: ItemId, media: &[MediaHandle], bindings: Bindings) {
        for listener in bindings.listeners {
            self.surface.detach_listener(listener);
        }
        for watch in bindings.watches {
            self.surface.unwatch(watch);
        }
        for video in bindings.videos {
            self.videos.unobserve(video);
            self.surface.release_video(video);
        }
        for handle in media {
            self.heights.forget(*handle);
            self.media_owner.remove(handle);
            self.remeasures.cancel(handle);
        }
        self.monitored.take(id);
    }

    // ===== Loading =====

    /// Load the next batch unconditionally. Returns the number of items
    /// appended; zero once the store is exhausted.
    pub fn load_more(&mut self, now_ms: u64) -> usize {
        if !self.is_running() {
            return 0;
        }
        self.load_batch(now_ms)
    }

    fn maybe_load_more(&mut self, now_ms: u64) -> bool {
        if self.store.is_exhausted() {
            return false;
        }
        let threshold = self.scroll_top + self.viewport.height + self.config.load_lookahead;
        if self.layout.shortest_column_bottom() > threshold {
            return false;
        }
        self.load_batch(now_ms) > 0
    }

    fn load_batch(&mut self, now_ms: u64) -> usize {
        let ids = self.store.load_next_batch(self.config.batch_size).ids();
        if ids.is_empty() {
            trace!("item store exhausted");
            return 0;
        }
        let count = ids.len();
        for index in ids {
            let id = ItemId::new(index);
            let Some(item) = self.store.get(id) else {
                continue;
            };
            let fragment = self.renderer.render(item, id, RenderContext::TOP_LEVEL);
            self.append(id, &fragment);
        }
        self.stats.batches_loaded += 1;
        self.stats.items_loaded += count as u64;
        debug!(count, offset = self.store.offset(), "batch loaded");

        self.media_pass(now_ms);
        self.update_videos();
        self.scheduler.note(now_ms);
        count
    }

    fn append(&mut self, id: ItemId, fragment: &Fragment) {
        let column = self.balancer.place();
        let container = self.surface.mount(id, column, fragment);
        let (media, bindings, size) = self.bind(id, container, fragment);
        if self.layout.push(id, column, size.height).is_none() {
            trace!(%id, %column, "layout rejected out-of-order item");
        }
        self.representations.push(Representation::Materialized {
            container,
            media,
            bindings,
        });
    }

    // ===== Height monitoring =====

    /// Start monitoring registered items that overlap the viewport extended
    /// downward by `monitor_lookahead`.
    fn media_pass(&mut self, now_ms: u64) {
        let window =
            VisibilityWindow::around(self.scroll_top, self.viewport, 0.0, self.config.monitor_lookahead);
        let due: Vec<ItemId> = self
            .monitored
            .ids()
            .filter(|id| {
                self.layout
                    .extent(*id)
                    .is_some_and(|extent| window.contains(&extent))
            })
            .collect();
        for id in due {
            self.start_monitoring(id, now_ms);
        }
    }

    fn start_monitoring(&mut self, id: ItemId, now_ms: u64) {
        let Some(media) = self.monitored.take(id) else {
            return;
        };
        let Some(Representation::Materialized { bindings, .. }) =
            self.representations.get_mut(id.get())
        else {
            return;
        };
        let mut changed = false;
        for handle in media {
            if let Some(watch) = self.surface.watch_media(handle) {
                bindings.watches.push(watch);
            }
            if let Some(height) = self.surface.media_height(handle) {
                changed |= self.heights.record(handle, height);
            }
        }
        trace!(%id, "media monitoring started");
        if changed {
            self.refresh_height(id, now_ms);
        }
    }

    fn run_due_remeasures(&mut self, now_ms: u64) {
        for media in self.remeasures.take_due(now_ms) {
            let Some(&owner) = self.media_owner.get(&media) else {
                continue;
            };
            let Some(height) = self.surface.media_height(media) else {
                continue;
            };
            if self.heights.record(media, height) {
                self.refresh_height(owner, now_ms);
            }
        }
    }

    /// Remeasure a materialized item and update its layout height.
    fn refresh_height(&mut self, id: ItemId, now_ms: u64) -> bool {
        let Some(container) = self
            .representations
            .get(id.get())
            .and_then(Representation::container)
        else {
            return false;
        };
        let Some(size) = self.surface.measure(container) else {
            return false;
        };
        let changed = self
            .layout
            .set_height(id, size.height)
            .map_or(false, |previous| previous != size.height.quantized());
        if changed {
            self.stats.remeasures += 1;
            self.scheduler.note(now_ms);
            trace!(%id, height = size.height.get(), "item height changed");
        }
        changed
    }

    // ===== Video =====

    fn update_videos(&mut self) {
        let viewport = VisibilityWindow::viewport(self.scroll_top, self.viewport).as_extent();
        for (video, owner) in self.videos.observed() {
            let Some(item) = self.layout.extent(owner) else {
                continue;
            };
            let Some(video_box) = self.surface.video_box(video) else {
                continue;
            };
            let target = Extent::new(item.top + video_box.offset.get(), video_box.height.get());
            match self.videos.update(video, intersection_ratio(&target, &viewport)) {
                Some(Crossing::Enter) => self.start_video(video),
                Some(Crossing::Leave) => self.stop_video(video),
                None => {}
            }
        }
    }

    fn start_video(&mut self, video: VideoHandle) {
        if self
            .surface
            .playback(video)
            .is_some_and(|playback| playback.paused || playback.ended)
        {
            self.surface.rewind(video);
        }
        self.surface.set_muted(video, true);
        match self.surface.play(video) {
            Ok(()) => self.stats.videos_started += 1,
            Err(err) => {
                self.stats.playback_failures += 1;
                trace!(?video, %err, "playback start ignored");
            }
        }
    }

    fn stop_video(&mut self, video: VideoHandle) {
        if self
            .surface
            .playback(video)
            .is_some_and(|playback| !playback.paused)
        {
            self.surface.pause(video);
        }
    }

    // ===== Queries =====

    /// Representation of a rendered id.
    pub fn representation(&self, id: ItemId) -> Option<&Representation> {
        self.representations.get(id.get())
    }

    /// Resolve an id to its current container.
    pub fn container(&self, id: ItemId) -> ContainerLookup {
        match self.representations.get(id.get()) {
            Some(Representation::Materialized { container, .. }) => {
                ContainerLookup::Materialized(*container)
            }
            Some(Representation::Placeholder { .. }) => ContainerLookup::Placeholder,
            None => ContainerLookup::Unknown,
        }
    }

    /// Number of ids ever appended to a column.
    pub fn rendered_count(&self) -> usize {
        self.representations.len()
    }

    /// Number of materialized items.
    pub fn materialized_count(&self) -> usize {
        self.representations
            .iter()
            .filter(|rep| rep.is_materialized())
            .count()
    }

    /// Number of placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.rendered_count() - self.materialized_count()
    }

    /// Items appended to each column.
    pub fn column_ends(&self) -> &[usize] {
        self.balancer.ends()
    }

    /// Document top of an item.
    pub fn item_top(&self, id: ItemId) -> Option<f64> {
        self.layout.extent(id).map(|extent| extent.top)
    }

    /// Document extent of an item.
    pub fn item_extent(&self, id: ItemId) -> Option<Extent> {
        self.layout.extent(id)
    }

    /// Whether the last pass considered `id` visible.
    pub fn is_visible(&self, id: ItemId) -> bool {
        self.visible.contains(&id)
    }

    /// Number of ids marked visible.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Whether a pass is waiting for a frame.
    pub fn is_pass_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Cumulative counters.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current scroll offset.
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The item store.
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Document layout.
    pub fn layout(&self) -> &FeedLayout {
        &self.layout
    }

    /// The shared video watcher.
    pub fn video_watcher(&self) -> &VideoWatcher {
        &self.videos
    }

    /// Media heights measured so far.
    pub fn height_cache(&self) -> &HeightCache {
        &self.heights
    }

    /// Items waiting for height monitoring.
    pub fn monitored(&self) -> &MonitoredMedia {
        &self.monitored
    }

    /// The host surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the host surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
