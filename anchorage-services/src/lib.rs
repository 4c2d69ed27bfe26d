// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference hosts and settings for anchorage: a window viewport, a scroll
//! dispatcher for nested scroll regions, and layered `overlay.toml` loading.
mod listeners;

pub mod scroll;
pub mod settings;
pub mod viewport;

pub use scroll::{ScrollDispatcher, ScrollableId};
pub use settings::{SettingsFile, SettingsRegistry};
pub use viewport::WindowViewport;
