#![warn(missing_docs)]

//! Position popups, menus and tooltips next to the element that opened them.

pub use nalgebra as math;

pub use anchorage_core as core;
pub use anchorage_services as services;

/// A "prelude" for users of anchorage.
///
/// Importing this module brings into scope the types needed to
/// position an overlay against a window.
///
/// ```rust
/// use anchorage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::PositioningConfig;
    pub use crate::core::geometry::{Point, Rect, Size};
    pub use crate::core::host::{
        Direction, FlexibleOrigin, MeasurableElement, MeasuredElement, ScrollNotifier, ViewportProvider,
    };
    pub use crate::core::preference::{presets, HorizontalAlign, PositionPreference, VerticalAlign};
    pub use crate::core::request::RepositionRequest;
    pub use crate::core::session::{create_session, Host, PositionChange, Session};
    pub use crate::core::style::StyleRecord;

    pub use crate::services::{ScrollDispatcher, SettingsRegistry, WindowViewport};
}
