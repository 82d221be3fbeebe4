//! Page-local geometry primitives
//!
//! Sizes, rectangles and four-sided margins used by every pipeline stage.
//! Rectangles are axis-aligned and live in page-local coordinates (origin
//! at the top-left corner of the page image, y growing downwards).

use serde::{Deserialize, Serialize};

/// A width/height pair, in whatever unit the context dictates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl SizeF {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A size is empty when either dimension is not strictly positive
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle in page-local coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle positioned at the origin with the given size
    #[inline]
    #[must_use]
    pub const fn from_size(size: SizeF) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> SizeF {
        SizeF::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Rectangle grown by the given deltas on each side
    ///
    /// Positive deltas move each edge outwards. This is how margins are
    /// applied around a content rectangle.
    #[inline]
    #[must_use]
    pub fn adjusted(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }
}

/// Four-sided distances around a rectangle
///
/// The unit is context-dependent: stored layout parameters keep margins in
/// millimetres, while geometry computations convert them to pixels first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarginsF {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl MarginsF {
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Uniform margins on all four sides
    #[inline]
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}
