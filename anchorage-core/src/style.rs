// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation of a resolved placement into overlay style properties.
//!
//! Vertical position is a `top` or a `bottom` offset, never both. Bottom-aligned
//! overlays use `bottom` so they grow upwards when their content gets taller.
//! Horizontally the same holds for `left`/`right`, after start/end are mapped
//! through the text direction. Offsets from the preference travel in the
//! `transform` as a translation, so the anchor properties always describe the
//! un-offset alignment.
//!
//! All offsets are relative to the placement's unmargined viewport, which is
//! the coordinate space of a fixed overlay container.

use indexmap::IndexMap;
use serde::Serialize;

use crate::host::Direction;
use crate::preference::VerticalAlign;
use crate::resolve::ResolvedPlacement;

/// Style properties for an overlay pane.
///
/// Field order and number formatting are stable, so two records built from
/// the same input serialize to the same bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StyleRecord {
    /// Distance from the viewport's top edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    /// Distance from the viewport's bottom edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    /// Distance from the viewport's left edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    /// Distance from the viewport's right edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    /// Translation carrying the preference offsets. Empty when there are none.
    pub transform: String,
    /// Pivot for scale animations, when enabled on the emitter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<String>,
    /// Attributes of the active preference.
    pub panel_attributes: IndexMap<String, serde_json::Value>,
}

impl StyleRecord {
    /// The record returned before any position was ever resolved.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Whether this record carries no position.
    pub fn is_unresolved(&self) -> bool {
        self.top.is_none() && self.bottom.is_none()
    }

    /// Render as an inline style declaration list, e.g. `top: 120px; left: 100px;`.
    pub fn to_css(&self) -> String {
        let mut declarations = Vec::with_capacity(6);
        let anchors = [
            ("top", &self.top),
            ("bottom", &self.bottom),
            ("left", &self.left),
            ("right", &self.right),
        ];
        for (name, value) in anchors {
            if let Some(value) = value {
                declarations.push(format!("{}: {};", name, value));
            }
        }
        if !self.transform.is_empty() {
            declarations.push(format!("transform: {};", self.transform));
        }
        if let Some(origin) = &self.transform_origin {
            declarations.push(format!("transform-origin: {};", origin));
        }
        declarations.join(" ")
    }
}

/// Builds [StyleRecord]s from placements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleEmitter {
    /// Also emit a `transform-origin` matching the overlay anchor.
    pub transform_origin: bool,
}

impl StyleEmitter {
    /// Create an emitter.
    pub fn new(transform_origin: bool) -> Self {
        Self { transform_origin }
    }

    /// Emit the style for `placement`.
    ///
    /// `keyboard_offset` is the vertical shift of the layout caused by an
    /// on-screen keyboard. The result only depends on the arguments.
    pub fn emit(
        &self,
        placement: &ResolvedPlacement,
        direction: Direction,
        keyboard_offset: f64,
    ) -> StyleRecord {
        let preference = &placement.preference;
        let boundary = &placement.boundary;
        let size = placement.overlay_size;

        // Anchor properties describe the point before offsets; the transform adds them back.
        let anchor = placement.overlay_point - placement.offset;
        let y = anchor.y - keyboard_offset;

        let mut style = StyleRecord {
            panel_attributes: preference.panel_attributes.clone(),
            transform: translation(placement.offset.x, placement.offset.y),
            ..StyleRecord::default()
        };

        if preference.overlay_y == VerticalAlign::Bottom {
            style.bottom = Some(px(boundary.bottom - (y + size.y)));
        } else {
            style.top = Some(px(y - boundary.top));
        }

        if preference.overlay_x.is_physical_right(direction) {
            style.right = Some(px(boundary.right - (anchor.x + size.x)));
        } else {
            style.left = Some(px(anchor.x - boundary.left));
        }

        if self.transform_origin {
            let x_origin = match preference.overlay_x.fraction(direction) {
                f if f == 0.0 => "left",
                f if f == 1.0 => "right",
                _ => "center",
            };
            let y_origin = match preference.overlay_y {
                VerticalAlign::Top => "top",
                VerticalAlign::Center => "center",
                VerticalAlign::Bottom => "bottom",
            };
            style.transform_origin = Some(format!("{} {}", x_origin, y_origin));
        }

        style
    }
}

/// Emit with the default emitter (no transform origin).
pub fn emit(placement: &ResolvedPlacement, direction: Direction, keyboard_offset: f64) -> StyleRecord {
    StyleEmitter::default().emit(placement, direction, keyboard_offset)
}

fn translation(x: f64, y: f64) -> String {
    let mut parts = Vec::with_capacity(2);
    if x != 0.0 {
        parts.push(format!("translateX({})", px(x)));
    }
    if y != 0.0 {
        parts.push(format!("translateY({})", px(y)));
    }
    parts.join(" ")
}

/// Format a pixel value. Negative zero is written as `0px`.
fn px(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}px", value)
}
