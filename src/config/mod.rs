//! Configuration module.

pub mod loader;

pub use loader::{ConfigError, ResolvedConfig};

/// Tunables of the virtualization engine.
///
/// Distances are CSS-style pixels, intervals are milliseconds of the host's
/// monotonic clock.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of render columns.
    pub columns: usize,
    /// Items appended per load.
    pub batch_size: usize,
    /// How far above the viewport items stay materialized.
    pub extra_top: f64,
    /// How far below the viewport items stay materialized.
    pub extra_bottom: f64,
    /// Load the next batch once the shortest column ends within this
    /// distance of the viewport bottom.
    pub load_lookahead: f64,
    /// Start monitoring media heights of items within this distance below
    /// the viewport.
    pub monitor_lookahead: f64,
    /// Floor between two visibility passes.
    pub min_pass_interval_ms: u64,
    /// Quiet period before a media container is remeasured.
    pub remeasure_debounce_ms: u64,
    /// Fraction of a video that must be visible to autoplay it.
    pub video_threshold: f64,
    /// Vertical gap between stacked items.
    pub item_gap: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            batch_size: 30,
            extra_top: 10_000.0,
            extra_bottom: 6_500.0,
            load_lookahead: 6_000.0,
            monitor_lookahead: 4_000.0,
            min_pass_interval_ms: 16,
            remeasure_debounce_ms: 200,
            video_threshold: 0.1,
            item_gap: 12.0,
        }
    }
}

impl EngineConfig {
    /// Reject settings the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for zero columns, a zero batch size,
    /// a video threshold outside `(0, 1]`, or a negative distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::Invalid("columns must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if !(self.video_threshold > 0.0 && self.video_threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "video_threshold must be in (0, 1], got {}",
                self.video_threshold
            )));
        }
        let distances = [
            ("extra_top", self.extra_top),
            ("extra_bottom", self.extra_bottom),
            ("load_lookahead", self.load_lookahead),
            ("monitor_lookahead", self.monitor_lookahead),
            ("item_gap", self.item_gap),
        ];
        for (name, value) in distances {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
