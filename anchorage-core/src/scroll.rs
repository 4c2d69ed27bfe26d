// SPDX-License-Identifier: MIT OR Apache-2.0

//! Visibility of origin and overlay relative to scrollable ancestors.

use crate::geometry::Rect;

/// Whether origin and overlay are clipped by, or scrolled out of, their scroll containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollableViewProperties {
    /// Some part of the origin is hidden by a scroll container.
    pub is_origin_clipped: bool,
    /// The origin is completely outside some scroll container.
    pub is_origin_outside_view: bool,
    /// Some part of the overlay is hidden by a scroll container.
    pub is_overlay_clipped: bool,
    /// The overlay is completely outside some scroll container.
    pub is_overlay_outside_view: bool,
}

impl ScrollableViewProperties {
    /// Compute the properties against the given container bounds.
    pub fn compute(origin: &Rect, overlay: &Rect, containers: &[Rect]) -> Self {
        Self {
            is_origin_clipped: is_clipped(origin, containers),
            is_origin_outside_view: is_outside_view(origin, containers),
            is_overlay_clipped: is_clipped(overlay, containers),
            is_overlay_outside_view: is_outside_view(overlay, containers),
        }
    }
}

fn is_clipped(element: &Rect, containers: &[Rect]) -> bool {
    containers.iter().any(|container| !container.contains_rect(element))
}

fn is_outside_view(element: &Rect, containers: &[Rect]) -> bool {
    containers.iter().any(|container| {
        element.bottom < container.top
            || element.top > container.bottom
            || element.right < container.left
            || element.left > container.right
    })
}
