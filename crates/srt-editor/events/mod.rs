//! Change notification for the store and observable UI state
//!
//! Provides `StoreEvent` for describing document changes and `Subscribers`
//! for delivering events to callbacks. Delivery is synchronous and in
//! registration order. Subscribing returns a `Subscription` handle that the
//! caller disposes of explicitly with [`Subscription::unsubscribe`].

use core::cell::{Cell, RefCell};
use core::fmt;
use core::ops::Range;
use std::rc::{Rc, Weak};

/// Change applied to a `SubtitleStore`
///
/// Exactly one event is delivered per applied store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Whole document replaced
    ContentSet {
        /// Number of cues in the new document
        len: usize,
    },
    /// Cue appended at the end
    Pushed { index: usize },
    /// Cue inserted before the previous occupant of `index`
    Inserted { index: usize },
    /// Cue removed
    Removed { index: usize },
    /// Cue replaced in place
    Updated { index: usize },
    /// Document emptied
    Cleared {
        /// Number of cues that were removed
        removed: usize,
    },
    /// Inclusive range collapsed into one cue at `start`
    Merged { start: usize, end: usize },
    /// Cue at `index` replaced by two cues
    Split { index: usize },
    /// Recorded edit applied (undo or redo)
    Reverted {
        /// First affected position
        index: usize,
        /// Number of cues taken out
        removed: usize,
        /// Number of cues put in
        inserted: usize,
    },
}

impl StoreEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            Self::ContentSet { len } => format!("Loaded {len} lines"),
            Self::Pushed { index } => format!("Appended line {}", index + 1),
            Self::Inserted { index } => format!("Inserted line {}", index + 1),
            Self::Removed { index } => format!("Removed line {}", index + 1),
            Self::Updated { index } => format!("Updated line {}", index + 1),
            Self::Cleared { removed } => format!("Cleared {removed} lines"),
            Self::Merged { start, end } => format!("Merged lines {}-{}", start + 1, end + 1),
            Self::Split { index } => format!("Split line {}", index + 1),
            Self::Reverted {
                index,
                removed,
                inserted,
            } => format!(
                "Restored {inserted} lines in place of {removed} at line {}",
                index + 1
            ),
        }
    }

    /// Indices of the document touched by this event, in post-change terms
    ///
    /// `None` means the whole document changed.
    pub fn affected_range(&self) -> Option<Range<usize>> {
        match *self {
            Self::ContentSet { .. } | Self::Cleared { .. } => None,
            Self::Pushed { index }
            | Self::Inserted { index }
            | Self::Updated { index }
            | Self::Merged { start: index, .. } => Some(index..index + 1),
            Self::Removed { index } => Some(index..index),
            Self::Split { index } => Some(index..index + 2),
            Self::Reverted {
                index, inserted, ..
            } => Some(index..index + inserted),
        }
    }
}

type Callback<E> = Rc<RefCell<dyn FnMut(&E)>>;

/// Information about a registered callback
struct HandlerInfo<E> {
    /// Unique handler ID
    id: usize,
    /// Callback implementation
    callback: Callback<E>,
}

struct Registry<E> {
    handlers: Vec<HandlerInfo<E>>,
    next_id: usize,
}

impl<E> Registry<E> {
    fn contains(&self, id: usize) -> bool {
        self.handlers.iter().any(|h| h.id == id)
    }
}

/// Type-erased removal so `Subscription` does not carry the event type
trait Detach {
    fn detach(&self, id: usize) -> bool;
    fn is_registered(&self, id: usize) -> bool;
}

impl<E> Detach for RefCell<Registry<E>> {
    fn is_registered(&self, id: usize) -> bool {
        self.borrow().contains(id)
    }

    fn detach(&self, id: usize) -> bool {
        let mut registry = self.borrow_mut();
        match registry.handlers.iter().position(|h| h.id == id) {
            Some(pos) => {
                registry.handlers.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// Ordered list of callbacks interested in events of type `E`
pub struct Subscribers<E> {
    registry: Rc<RefCell<Registry<E>>>,
    notifications: Cell<usize>,
}

impl<E: 'static> Subscribers<E> {
    /// Create an empty subscriber list
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                handlers: Vec::new(),
                next_id: 0,
            })),
            notifications: Cell::new(0),
        }
    }

    /// Register a callback, invoked after every subsequent notification
    #[must_use = "dropping the handle keeps the callback registered forever"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push(HandlerInfo {
            id,
            callback: Rc::new(RefCell::new(callback)),
        });

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        let registry: Weak<dyn Detach> = weak;
        Subscription { id, registry }
    }

    /// Deliver an event to every registered callback in registration order
    ///
    /// Callbacks may unsubscribe themselves or others while the event is being
    /// delivered. A callback that triggers a notification reaching itself again
    /// is skipped for the nested delivery. Returns the number of callbacks run.
    pub fn notify(&self, event: &E) -> usize {
        self.notifications.set(self.notifications.get() + 1);

        let pending: Vec<(usize, Callback<E>)> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|h| (h.id, Rc::clone(&h.callback)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in pending {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            if let Ok(mut guard) = callback.try_borrow_mut() {
                (&mut *guard)(event);
                delivered += 1;
            } else {
                tracing::trace!(handler = id, "skipping re-entrant notification");
            }
        }
        delivered
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    /// Whether no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of notifications sent so far
    pub fn notifications_sent(&self) -> usize {
        self.notifications.get()
    }
}

impl<E: 'static> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("handlers", &self.registry.borrow().handlers.len())
            .field("notifications", &self.notifications.get())
            .finish()
    }
}

/// Handle returned by `subscribe`; removes its callback when disposed
pub struct Subscription {
    id: usize,
    registry: Weak<dyn Detach>,
}

impl Subscription {
    /// Remove the callback
    ///
    /// Returns `false` if it was already gone or its owner was dropped.
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.detach(self.id))
    }

    /// Whether the callback is still registered
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.is_registered(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
