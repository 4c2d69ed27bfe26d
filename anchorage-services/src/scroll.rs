// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatcher for scroll events from nested scrollable regions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anchorage_core::geometry::Rect;
use anchorage_core::host::{Callback, ScrollNotifier, Subscription};
use indexmap::IndexMap;

use crate::listeners::ListenerSet;

/// Identifier of a registered scrollable region, unique within its dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollableId(usize);

/// Collects scroll events from every scrollable region around an origin.
///
/// Regions register their visible bounds; those bounds double as the
/// clipping rects used for [ScrollableViewProperties](anchorage_core::scroll::ScrollableViewProperties).
#[derive(Default)]
pub struct ScrollDispatcher {
    regions: RefCell<IndexMap<ScrollableId, Rect>>,
    next_id: Cell<usize>,
    listeners: ListenerSet,
}

impl ScrollDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Register a scrollable region with its visible bounds.
    pub fn register(&self, bounds: Rect) -> ScrollableId {
        let id = ScrollableId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.regions.borrow_mut().insert(id, bounds);
        id
    }

    /// Remove a region. Returns false if it wasn't registered.
    pub fn deregister(&self, id: ScrollableId) -> bool {
        self.regions.borrow_mut().shift_remove(&id).is_some()
    }

    /// Update a region's visible bounds, e.g. after layout.
    pub fn set_bounds(&self, id: ScrollableId, bounds: Rect) -> bool {
        match self.regions.borrow_mut().get_mut(&id) {
            Some(slot) => {
                *slot = bounds;
                true
            },
            None => false,
        }
    }

    /// Report that a region scrolled.
    pub fn scrolled(&self, id: ScrollableId) {
        if self.regions.borrow().contains_key(&id) {
            self.listeners.notify();
        } else {
            log::warn!("Scroll event from unregistered region {:?}", id);
        }
    }

    /// Number of registered regions.
    pub fn region_count(&self) -> usize {
        self.regions.borrow().len()
    }
}

impl ScrollNotifier for ScrollDispatcher {
    fn on_scroll(&self, callback: Callback) -> Subscription {
        self.listeners.subscribe(callback)
    }

    fn clipping_rects(&self) -> Vec<Rect> {
        self.regions.borrow().values().copied().collect()
    }
}
