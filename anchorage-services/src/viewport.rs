// SPDX-License-Identifier: MIT OR Apache-2.0

//! Window-backed viewport provider.

use std::cell::Cell;
use std::rc::Rc;

use anchorage_core::geometry::Rect;
use anchorage_core::host::{Callback, ScrollNotifier, Subscription, ViewportProvider};
use nalgebra::Vector2;

use crate::listeners::ListenerSet;

/// The visible part of a window's document.
///
/// The host feeds in window size, document scroll offset and on-screen
/// keyboard offset; sessions read the scroll-adjusted viewport rect and get
/// notified on resize ([ViewportProvider::on_change]) and document scroll
/// ([ScrollNotifier::on_scroll]).
pub struct WindowViewport {
    size: Cell<Vector2<f64>>,
    scroll: Cell<Vector2<f64>>,
    keyboard_offset: Cell<f64>,
    change_listeners: ListenerSet,
    scroll_listeners: ListenerSet,
}

impl WindowViewport {
    /// Create a viewport for a window of the given inner size.
    pub fn new(width: f64, height: f64) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(Vector2::new(width.max(0.0), height.max(0.0))),
            scroll: Cell::new(Vector2::zeros()),
            keyboard_offset: Cell::new(0.0),
            change_listeners: ListenerSet::default(),
            scroll_listeners: ListenerSet::default(),
        })
    }

    /// Current inner size.
    pub fn size(&self) -> Vector2<f64> {
        self.size.get()
    }

    /// Current document scroll offset.
    pub fn scroll_position(&self) -> Vector2<f64> {
        self.scroll.get()
    }

    /// Update the window size, notifying change listeners if it differs.
    pub fn set_size(&self, width: f64, height: f64) {
        let size = Vector2::new(width.max(0.0), height.max(0.0));
        if size != self.size.get() {
            log::trace!("Viewport resized to {}x{}", size.x, size.y);
            self.size.set(size);
            self.change_listeners.notify();
        }
    }

    /// Update the document scroll offset, notifying scroll listeners if it differs.
    pub fn scroll_to(&self, x: f64, y: f64) {
        let scroll = Vector2::new(x, y);
        if scroll != self.scroll.get() {
            self.scroll.set(scroll);
            self.scroll_listeners.notify();
        }
    }

    /// Update the on-screen keyboard offset, notifying change listeners if it differs.
    pub fn set_keyboard_offset(&self, offset: f64) {
        if offset != self.keyboard_offset.get() {
            self.keyboard_offset.set(offset);
            self.change_listeners.notify();
        }
    }

    /// Number of active subscriptions, change and scroll combined.
    pub fn listener_count(&self) -> usize {
        self.change_listeners.len() + self.scroll_listeners.len()
    }
}

impl ViewportProvider for WindowViewport {
    fn viewport_rect(&self, margin: f64) -> Rect {
        let size = self.size.get();
        let scroll = self.scroll.get();
        Rect::new(scroll.x, scroll.y, size.x, size.y).inset(margin)
    }

    fn on_change(&self, callback: Callback) -> Subscription {
        self.change_listeners.subscribe(callback)
    }

    fn keyboard_offset(&self) -> f64 {
        self.keyboard_offset.get()
    }
}

impl ScrollNotifier for WindowViewport {
    fn on_scroll(&self, callback: Callback) -> Subscription {
        self.scroll_listeners.subscribe(callback)
    }
}
