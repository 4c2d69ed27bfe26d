// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selection of a placement from an ordered preference list.
//!
//! Preferences are tried strictly in list order and the first one that keeps
//! the overlay completely inside the viewport wins. When none does, the
//! candidate with the largest visible area (earliest on ties) is pushed onto
//! the screen, see [crate::push].

use crate::fit::{score, OverlayFit};
use crate::geometry::{Point, Rect, Size};
use crate::host::Direction;
use crate::preference::PositionPreference;
use crate::push::push_onto_screen;
use nalgebra::Vector2;

/// The outcome of positioning one overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlacement {
    /// The preference that was selected.
    pub preference: PositionPreference,
    /// Index of [ResolvedPlacement::preference] in the session's list.
    /// [None] when the list was empty and the overlay's own position was used.
    pub index: Option<usize>,
    /// The anchor point on the origin.
    pub origin_point: Point,
    /// Final top-left corner of the overlay, offsets and push included.
    pub overlay_point: Point,
    /// Offsets that were applied to reach [ResolvedPlacement::overlay_point].
    pub offset: Vector2<f64>,
    /// Size of the overlay when it was placed.
    pub overlay_size: Size,
    /// The unmargined viewport. Style offsets are expressed relative to it.
    pub boundary: Rect,
    /// Text direction start/end were resolved against.
    pub direction: Direction,
    /// Whether the overlay was clamped into the viewport.
    pub pushed: bool,
}

/// Everything the resolver needs for one pass.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInput<'a> {
    /// Bounds of the origin.
    pub origin: Rect,
    /// Bounds of the overlay. Only the size matters, except when `preferences` is empty.
    pub overlay: Rect,
    /// Margin-inset viewport the overlay has to fit into.
    pub viewport: Rect,
    /// Unmargined viewport.
    pub boundary: Rect,
    /// Candidate alignments, most preferred first.
    pub preferences: &'a [PositionPreference],
    /// Offsets used by preferences that don't set their own.
    pub default_offset: Vector2<f64>,
    /// Current text direction.
    pub direction: Direction,
    /// Whether the fallback may clamp the overlay into the viewport.
    pub can_push: bool,
}

/// A preference evaluated against the current rects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Index into the preference list.
    pub index: usize,
    /// The anchor point on the origin.
    pub origin_point: Point,
    /// Top-left of the overlay, offsets included.
    pub overlay_point: Point,
    /// Offsets applied.
    pub offset: Vector2<f64>,
    /// Fit of the overlay at `overlay_point`.
    pub fit: OverlayFit,
}

/// Result of walking the preference list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// A preference keeps the overlay fully visible.
    Fit(Candidate),
    /// Nothing fits; carries the candidate with the largest visible area, if any.
    Overflow(Option<Candidate>),
}

/// Project the origin rect onto the anchor named by `preference`.
pub fn origin_point(origin: &Rect, preference: &PositionPreference, direction: Direction) -> Point {
    Point::new(
        origin.left + origin.width * preference.origin_x.fraction(direction),
        origin.top + origin.height * preference.origin_y.fraction(),
    )
}

/// Top-left corner that puts the overlay's anchor on `origin_point`. Offsets not included.
pub fn overlay_point(
    origin_point: Point,
    overlay: Size,
    preference: &PositionPreference,
    direction: Direction,
) -> Point {
    Point::new(
        origin_point.x - overlay.x * preference.overlay_x.fraction(direction),
        origin_point.y - overlay.y * preference.overlay_y.fraction(),
    )
}

/// The offset a preference ends up with once session defaults are filled in.
pub fn effective_offset(preference: &PositionPreference, default_offset: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(
        preference.offset_x.unwrap_or(default_offset.x),
        preference.offset_y.unwrap_or(default_offset.y),
    )
}

/// Evaluate a single preference.
pub fn candidate(input: &ResolveInput<'_>, index: usize, preference: &PositionPreference) -> Candidate {
    let size = input.overlay.size();
    let origin_point = origin_point(&input.origin, preference, input.direction);
    let offset = effective_offset(preference, input.default_offset);
    let overlay_point = overlay_point(origin_point, size, preference, input.direction) + offset;
    Candidate {
        index,
        origin_point,
        overlay_point,
        offset,
        fit: score(overlay_point, size, &input.viewport),
    }
}

/// Walk the preferences in order, stopping at the first complete fit.
pub fn resolve(input: &ResolveInput<'_>) -> Resolution {
    let mut best: Option<Candidate> = None;

    for (index, preference) in input.preferences.iter().enumerate() {
        let candidate = candidate(input, index, preference);
        log::trace!(
            "preference {} at ({}, {}): visible area {}",
            index,
            candidate.overlay_point.x,
            candidate.overlay_point.y,
            candidate.fit.visible_area
        );

        if candidate.fit.is_completely_within_viewport {
            return Resolution::Fit(candidate);
        }

        // Strictly greater keeps the earliest preference on ties.
        if best.map_or(true, |b| candidate.fit.visible_area > b.fit.visible_area) {
            best = Some(candidate);
        }
    }

    Resolution::Overflow(best)
}

/// Resolve a placement, falling back to the push resolver when nothing fits.
pub fn place(input: &ResolveInput<'_>) -> ResolvedPlacement {
    let size = input.overlay.size();

    match resolve(input) {
        Resolution::Fit(candidate) => placement_from(input, candidate, false),
        Resolution::Overflow(Some(mut candidate)) => {
            let pushed = input.can_push;
            if pushed {
                candidate.overlay_point = push_onto_screen(candidate.overlay_point, size, &input.viewport);
            }
            log::debug!(
                "no preference fits, using preference {} (pushed: {})",
                candidate.index,
                pushed
            );
            placement_from(input, candidate, pushed)
        },
        Resolution::Overflow(None) => {
            // No preferences: the overlay's current position is the only candidate.
            let current = input.overlay.origin();
            let overlay_point = if input.can_push {
                push_onto_screen(current, size, &input.viewport)
            } else {
                current
            };
            ResolvedPlacement {
                preference: PositionPreference::default(),
                index: None,
                origin_point: current,
                overlay_point,
                offset: Vector2::zeros(),
                overlay_size: size,
                boundary: input.boundary,
                direction: input.direction,
                pushed: input.can_push,
            }
        },
    }
}

/// Re-place the overlay against a cached origin point without re-deciding the preference.
///
/// Used when only the overlay's size changed. The overlay may still be pushed
/// if it now overflows, but it never switches sides.
pub fn reposition(
    last: &ResolvedPlacement,
    overlay: Size,
    viewport: &Rect,
    boundary: Rect,
    can_push: bool,
) -> ResolvedPlacement {
    let point = overlay_point(last.origin_point, overlay, &last.preference, last.direction) + last.offset;
    let fits = score(point, overlay, viewport).is_completely_within_viewport;
    let pushed = !fits && can_push;
    let overlay_point = if pushed {
        push_onto_screen(point, overlay, viewport)
    } else {
        point
    };

    ResolvedPlacement {
        preference: last.preference.clone(),
        index: last.index,
        origin_point: last.origin_point,
        overlay_point,
        offset: last.offset,
        overlay_size: overlay,
        boundary,
        direction: last.direction,
        pushed,
    }
}

fn placement_from(input: &ResolveInput<'_>, candidate: Candidate, pushed: bool) -> ResolvedPlacement {
    ResolvedPlacement {
        preference: input.preferences[candidate.index].clone(),
        index: Some(candidate.index),
        origin_point: candidate.origin_point,
        overlay_point: candidate.overlay_point,
        offset: candidate.offset,
        overlay_size: input.overlay.size(),
        boundary: input.boundary,
        direction: input.direction,
        pushed,
    }
}
