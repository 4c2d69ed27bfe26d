// SPDX-License-Identifier: MIT OR Apache-2.0
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use anchorage_core::host::{Callback, Subscription};
use indexmap::IndexMap;

#[derive(Default)]
struct Registry {
    next_id: usize,
    listeners: IndexMap<usize, Callback>,
}

/// A set of callbacks notified in registration order.
///
/// Ids are local to the set; there is no global counter.
#[derive(Clone, Default)]
pub(crate) struct ListenerSet {
    registry: Rc<RefCell<Registry>>,
}

impl ListenerSet {
    pub(crate) fn subscribe(&self, callback: Callback) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.insert(id, callback);
            id
        };

        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().listeners.shift_remove(&id);
            }
        })
    }

    /// Call every listener. Listeners may subscribe or unsubscribe while being notified.
    pub(crate) fn notify(&self) {
        let listeners: Vec<Callback> = self.registry.borrow().listeners.values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}
