//! Virtualization state machine.
//!
//! - `engine`: FeedEngine - loading, promotion/demotion, resource lifecycles
//! - `representation`: per-item Materialized/Placeholder state and bindings
//! - `resources`: media height cache and monitoring registry
//! - `video`: shared viewport-intersection watcher
//! - `toggle`: per-item language toggle state machine
//! - `scheduler`: signal coalescing and debouncing

pub mod engine;
pub mod representation;
pub mod resources;
pub mod scheduler;
pub mod toggle;
pub mod video;

pub use engine::{EngineStats, FeedEngine, PassOutcome, Phase};
pub use representation::{Bindings, ContainerLookup, Representation};
pub use resources::{HeightCache, MonitoredMedia};
pub use scheduler::{Debouncer, PassScheduler, Signal};
pub use toggle::{LanguageToggle, Shown};
pub use video::{Crossing, VideoWatcher};
