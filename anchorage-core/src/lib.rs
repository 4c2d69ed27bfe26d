#![warn(missing_docs)]

//! Core library for anchorage => See `anchorage` crate.
//!
//! Contains the connected overlay positioning engine: preference resolution,
//! fit scoring, the push fallback, style emission and positioning sessions.

#[cfg(feature = "vello")]
pub use vello::kurbo;

/// Contains the [Rect](geometry::Rect) and [Point](geometry::Point) primitives.
pub mod geometry;

/// Contains the interfaces a hosting toolkit implements.
pub mod host;

/// Contains alignment preferences and ready-made preference lists.
pub mod preference;

/// Contains the fit scorer.
pub mod fit;

/// Contains the position resolver.
pub mod resolve;

/// Contains the push fallback.
pub mod push;

/// Contains the style emitter.
pub mod style;

/// Contains positioning sessions.
pub mod session;

/// Contains reposition requests queued by notifiers.
pub mod request;

/// Contains scroll container visibility checks.
pub mod scroll;

/// Contains the [PositioningConfig](config::PositioningConfig) struct.
pub mod config;

/// Contains error types.
pub mod error;
