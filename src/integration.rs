//! Scripted session driver.
//!
//! Runs a feed engine over a [`SimSurface`] through a fixed scroll script and
//! collects per-step counts. The binary prints the resulting report; tests use
//! it to exercise the whole signal flow without I/O.

use crate::config::EngineConfig;
use crate::source::ItemStore;
use crate::state::{EngineStats, FeedEngine, Phase};
use crate::view::{DisplayMode, HtmlRenderer, SimConfig, SimSurface};
use crate::view_state::Viewport;
use serde::Serialize;
use tracing::{debug, info};

/// Shape of a scripted session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionScript {
    /// Viewport for the whole session.
    pub viewport: Viewport,
    /// Distance scrolled per step.
    pub scroll_step: f64,
    /// Steps scrolled down before scrolling back to the top.
    pub steps: usize,
    /// Milliseconds between animation frames.
    pub frame_interval_ms: u64,
    /// Quiet time after each scroll, long enough for debounced remeasures.
    pub settle_ms: u64,
    /// Show translations instead of original text.
    pub translation: bool,
}

impl Default for SessionScript {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1280.0, 800.0),
            scroll_step: 1000.0,
            steps: 20,
            frame_interval_ms: 16,
            settle_ms: 250,
            translation: false,
        }
    }
}

/// Engine and surface counts after one scroll step has settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReport {
    /// Scroll offset of the step.
    pub scroll_top: f64,
    /// Ids appended to columns so far.
    pub rendered: usize,
    /// Items in their full representation.
    pub materialized: usize,
    /// Items standing in as placeholders.
    pub placeholders: usize,
    /// Ids the last pass marked visible.
    pub visible: usize,
    /// Listeners attached on the surface.
    pub listeners: usize,
    /// Videos currently playing.
    pub playing_videos: usize,
}

/// Outcome of [`run_session`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Items in the feed.
    pub items: usize,
    /// Number of columns.
    pub columns: usize,
    /// One entry per step, the initial state first.
    pub steps: Vec<StepReport>,
    /// Counters at the end of the session.
    pub stats: EngineStats,
    /// Detached videos whose source was never released, after teardown.
    pub leaked_videos: usize,
    /// Listeners still attached after teardown.
    pub leaked_listeners: usize,
}

/// Drive one engine through `script` and report what happened.
///
/// The engine is initialized at time zero, scrolled down `steps` times, then
/// scrolled back up to the top by the same steps. After every scroll the
/// surface completes its pending media loads, the changes are reported, and
/// frames are delivered until `settle_ms` has passed. The engine is torn down
/// at the end.
pub fn run_session(
    store: ItemStore,
    config: EngineConfig,
    sim: SimConfig,
    script: &SessionScript,
) -> SessionReport {
    let items = store.len();
    let columns = config.columns;
    let mut driver = Driver {
        engine: FeedEngine::new(store, SimSurface::new(sim), HtmlRenderer, config),
        now_ms: 0,
        frame_interval_ms: script.frame_interval_ms.max(1),
    };

    driver.engine.init(script.viewport, 0);
    if script.translation {
        driver.engine.set_display_mode(
            DisplayMode {
                translation_shown: true,
            },
            0,
        );
    }
    let mut steps = vec![driver.settle(script.settle_ms)];

    let offsets = (1..=script.steps)
        .chain((0..script.steps).rev())
        .map(|step| step as f64 * script.scroll_step);
    for top in offsets {
        driver.advance(script.frame_interval_ms);
        driver.engine.on_scroll(top, driver.now_ms);
        let step = driver.settle(script.settle_ms);
        debug!(
            scroll_top = step.scroll_top,
            materialized = step.materialized,
            placeholders = step.placeholders,
            "step settled"
        );
        steps.push(step);
    }

    driver.engine.teardown();
    let stats = driver.engine.stats();
    let surface = driver.engine.surface();
    let report = SessionReport {
        items,
        columns,
        steps,
        stats,
        leaked_videos: surface.leaked_video_count(),
        leaked_listeners: surface.live_listener_count(),
    };
    info!(
        items = report.items,
        promotions = stats.promotions,
        demotions = stats.demotions,
        "session finished"
    );
    report
}

struct Driver {
    engine: FeedEngine<SimSurface, HtmlRenderer>,
    now_ms: u64,
    frame_interval_ms: u64,
}

impl Driver {
    fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Complete media loads and deliver frames for `settle_ms`.
    fn settle(&mut self, settle_ms: u64) -> StepReport {
        let end = self.now_ms + settle_ms;
        loop {
            if self.engine.phase() == Phase::Running {
                let changed = self.engine.surface_mut().complete_pending_loads();
                for media in changed {
                    self.engine.on_media_changed(media, self.now_ms);
                }
            }
            self.advance(self.frame_interval_ms);
            self.engine.on_frame(self.now_ms);
            if self.now_ms >= end {
                break;
            }
        }
        self.snapshot()
    }

    fn snapshot(&self) -> StepReport {
        let engine = &self.engine;
        StepReport {
            scroll_top: engine.scroll_top(),
            rendered: engine.rendered_count(),
            materialized: engine.materialized_count(),
            placeholders: engine.placeholder_count(),
            visible: engine.visible_count(),
            listeners: engine.surface().live_listener_count(),
            playing_videos: engine.surface().playing_videos().len(),
        }
    }
}
