//! Core geometry newtypes
//!
//! Measurements are CSS-style pixels as `f64`. Heights that enter the layout
//! index are quantized to thousandths of a pixel, matching the precision the
//! host reports measured heights with, so that prefix sums stay exact.

use serde::Serialize;

/// A length in pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Px(f64);

impl Px {
    /// Zero length.
    pub const ZERO: Self = Self(0.0);

    /// Create a length. Negative and non-finite inputs clamp to zero.
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// Raw pixel value.
    pub fn get(&self) -> f64 {
        self.0
    }

    /// Length in thousandths of a pixel, rounded to nearest.
    pub fn to_millipx(&self) -> i64 {
        (self.0 * 1000.0).round() as i64
    }

    /// Inverse of [`Px::to_millipx`].
    pub fn from_millipx(millipx: i64) -> Self {
        Self::new(millipx as f64 / 1000.0)
    }

    /// Round to the nearest thousandth of a pixel.
    pub fn quantized(&self) -> Self {
        Self::from_millipx(self.to_millipx())
    }
}

impl std::ops::Add for Px {
    type Output = Px;

    fn add(self, rhs: Px) -> Px {
        Px::new(self.0 + rhs.0)
    }
}

/// Width and height of a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    /// Width in pixels.
    pub width: Px,
    /// Height in pixels.
    pub height: Px,
}

impl Size {
    /// Create a size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Px::new(width),
            height: Px::new(height),
        }
    }
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
}

impl Viewport {
    /// Create viewport dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Vertical extent of a block in document coordinates. `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Extent {
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Extent {
    /// Extent starting at `top` spanning `height`.
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height.max(0.0),
        }
    }

    /// Height of the extent.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Length of the overlap with `other`, zero when disjoint.
    pub fn overlap(&self, other: &Extent) -> f64 {
        (self.bottom.min(other.bottom) - self.top.max(other.top)).max(0.0)
    }
}
