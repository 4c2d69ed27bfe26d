// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alignment preferences.
//!
//! A [PositionPreference] pairs an anchor on the origin with an anchor on the
//! overlay. Sessions receive an ordered list of them; the first entry is the
//! most preferred.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::host::Direction;

/// Horizontal anchor. `Start` and `End` follow the text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    /// Leading edge (left in ltr, right in rtl).
    #[default]
    Start,
    /// Horizontal midpoint.
    Center,
    /// Trailing edge (right in ltr, left in rtl).
    End,
}

impl HorizontalAlign {
    /// Fraction of a width, measured from the physical left edge, this anchor sits at.
    pub fn fraction(self, direction: Direction) -> f64 {
        match (self, direction) {
            (Self::Center, _) => 0.5,
            (Self::Start, Direction::Ltr) | (Self::End, Direction::Rtl) => 0.0,
            (Self::End, Direction::Ltr) | (Self::Start, Direction::Rtl) => 1.0,
        }
    }

    /// Whether this anchor lands on the physical right edge in `direction`.
    pub fn is_physical_right(self, direction: Direction) -> bool {
        self.fraction(direction) == 1.0
    }
}

/// Vertical anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// Top edge.
    #[default]
    Top,
    /// Vertical midpoint.
    Center,
    /// Bottom edge.
    Bottom,
}

impl VerticalAlign {
    /// Fraction of a height, measured from the top edge, this anchor sits at.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

/// One candidate alignment between origin and overlay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionPreference {
    /// Horizontal anchor on the origin.
    pub origin_x: HorizontalAlign,
    /// Vertical anchor on the origin.
    pub origin_y: VerticalAlign,
    /// Horizontal anchor on the overlay.
    pub overlay_x: HorizontalAlign,
    /// Vertical anchor on the overlay.
    pub overlay_y: VerticalAlign,
    /// Horizontal offset. Falls back to the session default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    /// Vertical offset. Falls back to the session default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    /// Attributes copied onto the overlay panel while this preference is active.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub panel_attributes: IndexMap<String, serde_json::Value>,
}

impl PositionPreference {
    /// Create a preference without offsets or panel attributes.
    pub fn new(
        origin_x: HorizontalAlign,
        origin_y: VerticalAlign,
        overlay_x: HorizontalAlign,
        overlay_y: VerticalAlign,
    ) -> Self {
        Self {
            origin_x,
            origin_y,
            overlay_x,
            overlay_y,
            offset_x: None,
            offset_y: None,
            panel_attributes: IndexMap::new(),
        }
    }

    /// Set the horizontal offset.
    pub fn with_offset_x(mut self, offset: f64) -> Self {
        self.offset_x = Some(offset);
        self
    }

    /// Set the vertical offset.
    pub fn with_offset_y(mut self, offset: f64) -> Self {
        self.offset_y = Some(offset);
        self
    }

    /// Add a panel attribute.
    pub fn with_panel_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.panel_attributes.insert(key.into(), value.into());
        self
    }
}

/// Ready-made preference lists for the common widgets.
pub mod presets {
    use super::{HorizontalAlign as X, PositionPreference, VerticalAlign as Y};

    /// Below the origin, start-aligned; otherwise above it.
    ///
    /// Used by selects and autocomplete panels.
    pub fn below_then_above() -> Vec<PositionPreference> {
        vec![
            PositionPreference::new(X::Start, Y::Bottom, X::Start, Y::Top),
            PositionPreference::new(X::Start, Y::Top, X::Start, Y::Bottom),
        ]
    }

    /// Menu placements: below/above, start-aligned first, then end-aligned.
    pub fn menu() -> Vec<PositionPreference> {
        vec![
            PositionPreference::new(X::Start, Y::Bottom, X::Start, Y::Top),
            PositionPreference::new(X::Start, Y::Top, X::Start, Y::Bottom),
            PositionPreference::new(X::End, Y::Bottom, X::End, Y::Top),
            PositionPreference::new(X::End, Y::Top, X::End, Y::Bottom),
        ]
    }

    /// Nested menu placements: beside the trigger item, after it first.
    pub fn submenu() -> Vec<PositionPreference> {
        vec![
            PositionPreference::new(X::End, Y::Top, X::Start, Y::Top),
            PositionPreference::new(X::End, Y::Bottom, X::Start, Y::Bottom),
            PositionPreference::new(X::Start, Y::Top, X::End, Y::Top),
            PositionPreference::new(X::Start, Y::Bottom, X::End, Y::Bottom),
        ]
    }

    /// Tooltip placements: centered below, then centered above, separated by `gap`.
    pub fn tooltip(gap: f64) -> Vec<PositionPreference> {
        vec![
            PositionPreference::new(X::Center, Y::Bottom, X::Center, Y::Top).with_offset_y(gap),
            PositionPreference::new(X::Center, Y::Top, X::Center, Y::Bottom).with_offset_y(-gap),
        ]
    }
}
