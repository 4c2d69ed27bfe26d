// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;

/// Why an overlay needs to be positioned again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositionRequest {
    /// The viewport was resized or rotated.
    ViewportChanged,
    /// A scrollable ancestor scrolled.
    Scrolled,
    /// Only the overlay's content size changed.
    ContentResized,
}

impl RepositionRequest {
    /// Whether the preference has to be re-decided, rather than just re-emitted.
    pub fn needs_resolve(self) -> bool {
        !matches!(self, Self::ContentResized)
    }
}

/// Queue of pending reposition requests.
///
/// Notifier callbacks only push here; the host drains it when it is ready to
/// reposition. Each kind of request is held at most once, in arrival order,
/// so bursts of scroll or resize events collapse into a single entry.
#[derive(Clone, Default)]
pub struct RepositionQueue {
    requests: Rc<RefCell<IndexSet<RepositionRequest>>>,
}

impl RepositionQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a request. Does nothing if one of the same kind is already pending.
    pub fn push(&self, request: RepositionRequest) {
        self.requests.borrow_mut().insert(request);
    }

    /// Take all pending requests.
    pub fn drain(&self) -> Vec<RepositionRequest> {
        self.requests.borrow_mut().drain(..).collect()
    }

    /// Drop all pending requests.
    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.requests.borrow().is_empty()
    }
}

impl std::fmt::Debug for RepositionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.requests.borrow().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_requests_are_stored_once() {
        let queue = RepositionQueue::new();
        for _ in 0..10_000 {
            queue.push(RepositionRequest::Scrolled);
            queue.push(RepositionRequest::ViewportChanged);
        }
        queue.push(RepositionRequest::Scrolled);
        assert_eq!(queue.len(), 2);

        assert_eq!(
            queue.drain(),
            vec![RepositionRequest::Scrolled, RepositionRequest::ViewportChanged]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clones_share_one_queue() {
        let queue = RepositionQueue::new();
        let notifier_side = queue.clone();
        notifier_side.push(RepositionRequest::ContentResized);
        assert_eq!(queue.len(), 1);
        queue.clear();
        assert!(notifier_side.is_empty());
    }
}
