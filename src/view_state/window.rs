//! Extended visibility window.
//!
//! The viewport stretched upward by `extra_top` and downward by
//! `extra_bottom`. The upward margin is much larger: content the user just
//! scrolled past is likely to be revisited, while the region below is already
//! being filled by the loader.

use super::types::{Extent, Viewport};

/// Document range inside which items stay materialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityWindow {
    /// Top edge: `scroll_top - extra_top`.
    pub top: f64,
    /// Bottom edge: `scroll_top + viewport_height + extra_bottom`.
    pub bottom: f64,
}

impl VisibilityWindow {
    /// Window around the viewport at `scroll_top`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use feedwall::view_state::window::VisibilityWindow;
    /// # use feedwall::view_state::types::Viewport;
    /// let window = VisibilityWindow::around(5000.0, Viewport::new(1000.0, 800.0), 10000.0, 6500.0);
    /// assert_eq!(window.top, -5000.0);
    /// assert_eq!(window.bottom, 12300.0);
    /// ```
    pub fn around(scroll_top: f64, viewport: Viewport, extra_top: f64, extra_bottom: f64) -> Self {
        Self {
            top: scroll_top - extra_top,
            bottom: scroll_top + viewport.height + extra_bottom,
        }
    }

    /// The bare viewport with no margins.
    pub fn viewport(scroll_top: f64, viewport: Viewport) -> Self {
        Self::around(scroll_top, viewport, 0.0, 0.0)
    }

    /// True when `extent` overlaps the window. Touching edges count as overlap.
    pub fn contains(&self, extent: &Extent) -> bool {
        extent.bottom >= self.top && extent.top <= self.bottom
    }

    /// The window as an extent.
    pub fn as_extent(&self) -> Extent {
        Extent {
            top: self.top,
            bottom: self.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_at(scroll_top: f64) -> VisibilityWindow {
        VisibilityWindow::around(scroll_top, Viewport::new(1000.0, 800.0), 10_000.0, 6_500.0)
    }

    #[test]
    fn item_far_above_is_outside() {
        // Item ends 20,000px above the viewport top.
        let window = window_at(30_000.0);
        assert!(!window.contains(&Extent::new(9_000.0, 1_000.0)));
    }

    #[test]
    fn item_within_top_margin_is_inside() {
        let window = window_at(30_000.0);
        assert!(window.contains(&Extent::new(21_000.0, 500.0)));
    }

    #[test]
    fn item_within_bottom_margin_is_inside() {
        let window = window_at(0.0);
        assert!(window.contains(&Extent::new(7_200.0, 100.0)));
        assert!(!window.contains(&Extent::new(7_301.0, 100.0)));
    }

    #[test]
    fn touching_edge_counts_as_visible() {
        let window = window_at(10_000.0);
        assert!(window.contains(&Extent::new(-100.0, 100.0)));
        assert!(window.contains(&Extent::new(17_300.0, 50.0)));
    }

    #[test]
    fn margins_are_asymmetric() {
        let window = window_at(20_000.0);
        assert_eq!(20_000.0 - window.top, 10_000.0);
        assert_eq!(window.bottom - (20_000.0 + 800.0), 6_500.0);
    }

    #[test]
    fn bare_viewport_has_no_margins() {
        let window = VisibilityWindow::viewport(100.0, Viewport::new(10.0, 50.0));
        assert_eq!(window.as_extent(), Extent { top: 100.0, bottom: 150.0 });
    }
}
