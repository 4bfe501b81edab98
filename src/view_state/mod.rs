//! View-state layer - Geometry, layout and visibility
//!
//! Pure data structures describing where items sit in the document and which
//! region counts as visible. Nothing here talks to the host surface.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (Px, Size, Viewport, Extent)
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `columns`: ColumnBalancer - greedy count-balanced column assignment
//! - `layout`: FeedLayout - per-column stacks and item document positions
//! - `window`: VisibilityWindow - asymmetric extended visibility window

pub mod columns;
pub mod height_index;
pub mod layout;
pub mod types;
pub mod window;

pub use columns::ColumnBalancer;
pub use layout::{FeedLayout, Slot};
pub use types::{Extent, Px, Size, Viewport};
pub use window::VisibilityWindow;
