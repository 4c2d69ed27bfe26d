// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoring of a candidate overlay placement against the viewport.

use crate::geometry::{Point, Rect, Size};

/// Overflow below this is treated as float noise from clamping.
const OVERFLOW_EPSILON: f64 = 1e-6;

/// How well an overlay placed at a given point fits inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFit {
    /// Area of the overlay that remains inside the viewport.
    pub visible_area: f64,
    /// Whether the whole overlay is visible.
    pub is_completely_within_viewport: bool,
    /// Whether the overlay's full height is visible.
    pub fits_vertically: bool,
    /// Whether the overlay's full width is visible.
    pub fits_horizontally: bool,
}

/// Score an overlay whose top-left corner sits at `point`.
pub fn score(point: Point, overlay: Size, viewport: &Rect) -> OverlayFit {
    let left_overflow = overflow(viewport.left - point.x);
    let right_overflow = overflow(point.x + overlay.x - viewport.right);
    let top_overflow = overflow(viewport.top - point.y);
    let bottom_overflow = overflow(point.y + overlay.y - viewport.bottom);

    let visible_width = (overlay.x - left_overflow - right_overflow).max(0.0);
    let visible_height = (overlay.y - top_overflow - bottom_overflow).max(0.0);
    let visible_area = visible_width * visible_height;

    OverlayFit {
        visible_area,
        is_completely_within_viewport: visible_area == overlay.x * overlay.y,
        fits_vertically: visible_height == overlay.y,
        fits_horizontally: visible_width == overlay.x,
    }
}

fn overflow(amount: f64) -> f64 {
    if amount > OVERFLOW_EPSILON {
        amount
    } else {
        0.0
    }
}
