// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain geometric value types shared by every stage of the engine.
//!
//! All coordinates are page pixels. Origin, overlay and viewport rectangles
//! are expected to share one coordinate space (the viewport rect is already
//! scroll-adjusted by its provider).

use nalgebra::{Point2, Vector2};

/// A point in page coordinates.
pub type Point = Point2<f64>;

/// A width/height pair. `x` is the width, `y` the height.
pub type Size = Vector2<f64>;

/// An axis-aligned rectangle.
///
/// `right == left + width` and `bottom == top + height` always hold for rects
/// built through the constructors. Position may be negative (off-screen),
/// width and height never are.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Distance of the top edge from the page origin.
    pub top: f64,
    /// Distance of the left edge from the page origin.
    pub left: f64,
    /// Position of the right edge.
    pub right: f64,
    /// Position of the bottom edge.
    pub bottom: f64,
    /// Horizontal extent, never negative.
    pub width: f64,
    /// Vertical extent, never negative.
    pub height: f64,
}

impl Rect {
    /// Create a rect from its top-left corner and size. Negative sizes are clamped to zero.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            top,
            left,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Create a rect from its four edges.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Create a rect from a top-left point and a size.
    pub fn from_point_size(point: Point, size: Size) -> Self {
        Self::new(point.x, point.y, size.x, size.y)
    }

    /// A zero-sized rect at the given point.
    pub fn at_point(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Rebuild the derived edges from `left`/`top`/`width`/`height`.
    ///
    /// Used on rects handed in by collaborators, whose public fields may have
    /// been filled in by hand.
    pub fn normalized(&self) -> Self {
        Self::new(self.left, self.top, self.width, self.height)
    }

    /// The top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The size of the rect.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Width times height.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Shrink the rect by `margin` on all four sides.
    ///
    /// A margin of half the width (or height) or more collapses that axis to zero.
    pub fn inset(&self, margin: f64) -> Self {
        Self::new(
            self.left + margin,
            self.top + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }

    /// Move the rect by the given amounts.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// Whether `other` lies completely inside this rect (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Whether the point lies inside this rect (edges inclusive).
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Whether the two rects share any area or touch.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.right < self.left
            || other.left > self.right
            || other.bottom < self.top
            || other.top > self.bottom)
    }
}

#[cfg(feature = "vello")]
impl From<vello::kurbo::Rect> for Rect {
    fn from(rect: vello::kurbo::Rect) -> Self {
        let rect = rect.abs();
        Self::from_edges(rect.x0, rect.y0, rect.x1, rect.y1)
    }
}

#[cfg(feature = "vello")]
impl From<Rect> for vello::kurbo::Rect {
    fn from(rect: Rect) -> Self {
        vello::kurbo::Rect::new(rect.left, rect.top, rect.right, rect.bottom)
    }
}
