// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fallback placement when no preference fits: clamp the overlay into the viewport.

use crate::geometry::{Point, Rect, Size};

/// Clamp the overlay's top-left corner so the overlay stays inside `viewport`.
///
/// On an axis where the overlay is larger than the viewport, the overlay is
/// pinned to the viewport's near (left/top) edge and overflows the far one.
pub fn push_onto_screen(point: Point, overlay: Size, viewport: &Rect) -> Point {
    Point::new(
        clamp_axis(point.x, viewport.left, viewport.right - overlay.x),
        clamp_axis(point.y, viewport.top, viewport.bottom - overlay.y),
    )
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if max < min {
        min
    } else {
        value.max(min).min(max)
    }
}
