// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces to the hosting toolkit.
//!
//! The engine never walks a widget tree itself. Anything that can report
//! rectangles, a text direction and change notifications can host a session.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Something whose on-screen bounds can be measured.
pub trait Measurable {
    /// The current bounds in page coordinates, or [None] if the element is
    /// detached from layout.
    fn measure(&self) -> Option<Rect>;
}

/// Shared handle to a measurable element, as held by a session.
pub type MeasurableElement = Rc<dyn Measurable>;

impl Measurable for Rect {
    fn measure(&self) -> Option<Rect> {
        Some(*self)
    }
}

/// An element whose bounds are pushed in by the host's layout pass.
///
/// Starts out unmeasured until [MeasuredElement::set_bounds] is called.
#[derive(Debug, Default)]
pub struct MeasuredElement {
    bounds: Cell<Option<Rect>>,
}

impl MeasuredElement {
    /// Create an element with known bounds.
    pub fn new(bounds: Rect) -> Rc<Self> {
        Rc::new(Self {
            bounds: Cell::new(Some(bounds)),
        })
    }

    /// Create an element that has not been laid out yet.
    pub fn unmeasured() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Record new bounds after layout.
    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(Some(bounds));
    }

    /// Mark the element as removed from layout.
    pub fn detach_from_layout(&self) {
        self.bounds.set(None);
    }
}

impl Measurable for MeasuredElement {
    fn measure(&self) -> Option<Rect> {
        self.bounds.get()
    }
}

/// An origin that is a bare point (a cursor position, a caret) rather than an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexibleOrigin {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Optional width, so `End`/`Center` anchors have something to measure against.
    pub width: Option<f64>,
    /// Optional height.
    pub height: Option<f64>,
}

impl FlexibleOrigin {
    /// A zero-sized origin at the given point.
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }

    /// Give the origin a size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

impl Measurable for FlexibleOrigin {
    fn measure(&self) -> Option<Rect> {
        Some(Rect::new(
            self.x,
            self.y,
            self.width.unwrap_or(0.0),
            self.height.unwrap_or(0.0),
        ))
    }
}

/// Text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// Source of the current text direction.
pub trait Directionality {
    /// The direction in effect right now.
    fn direction(&self) -> Direction;
}

impl Directionality for Direction {
    fn direction(&self) -> Direction {
        *self
    }
}

impl Directionality for Cell<Direction> {
    fn direction(&self) -> Direction {
        self.get()
    }
}

/// Callback invoked by notifiers. Must not call back into the session.
pub type Callback = Rc<dyn Fn()>;

/// Handle returned by a notifier. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the notifier's unsubscribe action.
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription for notifiers that never fire.
    pub fn noop() -> Self {
        Self { unsubscribe: None }
    }

    /// Unsubscribe now.
    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Reports the visible page area.
pub trait ViewportProvider {
    /// The visible rect in page coordinates, inset by `margin` on every side.
    fn viewport_rect(&self, margin: f64) -> Rect;

    /// Register a callback for resize/orientation changes.
    fn on_change(&self, callback: Callback) -> Subscription;

    /// Vertical shift caused by an on-screen keyboard, 0 when there is none.
    fn keyboard_offset(&self) -> f64 {
        0.0
    }
}

/// A fixed viewport that never changes.
impl ViewportProvider for Rect {
    fn viewport_rect(&self, margin: f64) -> Rect {
        self.normalized().inset(margin)
    }

    fn on_change(&self, _callback: Callback) -> Subscription {
        Subscription::noop()
    }
}

/// Reports scrolling in any scrollable ancestor of the origin.
pub trait ScrollNotifier {
    /// Register a callback for scroll events.
    fn on_scroll(&self, callback: Callback) -> Subscription;

    /// Visible bounds of the scrollable ancestors, used to tell whether the
    /// origin or overlay has been scrolled out of view.
    fn clipping_rects(&self) -> Vec<Rect> {
        Vec::new()
    }
}
