//! The subtitle document: an ordered list of cues and its edit operations
//!
//! `SubtitleStore` exclusively owns the cue sequence. Every structural edit
//! reduces to one [`Splice`] (remove a run of cues at an index, insert new
//! ones) and returns the splice that reverses it, which is what the command
//! layer stores for undo. Edits addressing a position outside the document are
//! silent no-ops: nothing changes and no subscriber is notified.

use crate::events::{StoreEvent, Subscribers, Subscription};
use srt_core::Cue;
use std::rc::Rc;

/// Primitive structural edit: replace `remove` cues at `index` with `insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    index: usize,
    remove: usize,
    insert: Vec<Cue>,
}

impl Splice {
    /// Create a new splice
    pub fn new(index: usize, remove: usize, insert: Vec<Cue>) -> Self {
        Self {
            index,
            remove,
            insert,
        }
    }

    /// Position of the first affected cue
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of cues taken out
    pub const fn remove_count(&self) -> usize {
        self.remove
    }

    /// Cues put in
    pub fn inserted(&self) -> &[Cue] {
        &self.insert
    }

    /// Whether this splice addresses positions inside a document of `len` cues
    pub const fn fits(&self, len: usize) -> bool {
        self.index <= len && self.remove <= len - self.index
    }
}

/// Ordered, observable subtitle document
///
/// # Examples
///
/// ```
/// use srt_editor::SubtitleStore;
/// use srt_core::{Cue, Timecode};
///
/// let mut store = SubtitleStore::new();
/// store.push(Cue::new(Timecode::ZERO, Timecode::from_seconds(1.0)?, "hello"));
/// let inverse = store.split(0, 3).expect("index is in bounds");
/// assert_eq!(store.get(1).map(|c| c.text.as_str()), Some("lo"));
///
/// store.apply(inverse);
/// assert_eq!(store.len(), 1);
/// # Ok::<(), srt_core::CoreError>(())
/// ```
#[derive(Debug)]
pub struct SubtitleStore {
    /// Current cue sequence, display order
    cues: Vec<Cue>,

    /// Last snapshot handed out
    snapshot: Rc<[Cue]>,

    /// Whether `cues` changed since `snapshot` was taken
    dirty: bool,

    /// Reserved timecode lock, starts locked
    locked: bool,

    /// Change listeners
    subscribers: Subscribers<StoreEvent>,
}

impl SubtitleStore {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            cues: Vec::new(),
            snapshot: Rc::from(Vec::new()),
            dirty: false,
            locked: true,
            subscribers: Subscribers::new(),
        }
    }

    /// Create a document holding `cues`
    pub fn with_content(cues: Vec<Cue>) -> Self {
        let mut store = Self::new();
        store.cues = cues;
        store.dirty = true;
        store
    }

    /// Replace the whole document
    pub fn set_content(&mut self, cues: Vec<Cue>) -> Splice {
        let len = cues.len();
        let previous = core::mem::replace(&mut self.cues, cues);
        tracing::debug!(len, replaced = previous.len(), "set store content");
        self.changed(&StoreEvent::ContentSet { len });
        Splice::new(0, len, previous)
    }

    /// Append a cue
    pub fn push(&mut self, cue: Cue) -> Splice {
        let index = self.cues.len();
        self.cues.push(cue);
        tracing::debug!(index, "pushed cue");
        self.changed(&StoreEvent::Pushed { index });
        Splice::new(index, 1, Vec::new())
    }

    /// Insert a cue before `index`
    ///
    /// An index past the end is clamped, appending the cue.
    pub fn insert(&mut self, cue: Cue, index: usize) -> Splice {
        let index = index.min(self.cues.len());
        self.cues.insert(index, cue);
        tracing::debug!(index, "inserted cue");
        self.changed(&StoreEvent::Inserted { index });
        Splice::new(index, 1, Vec::new())
    }

    /// Remove the cue at `index`, no-op when out of bounds
    pub fn remove(&mut self, index: usize) -> Option<Splice> {
        if index >= self.cues.len() {
            tracing::trace!(index, len = self.cues.len(), "remove out of bounds ignored");
            return None;
        }
        let removed = self.cues.remove(index);
        tracing::debug!(index, "removed cue");
        self.changed(&StoreEvent::Removed { index });
        Some(Splice::new(index, 0, vec![removed]))
    }

    /// Replace the cue at `index`, no-op when out of bounds
    pub fn update(&mut self, cue: Cue, index: usize) -> Option<Splice> {
        let Some(slot) = self.cues.get_mut(index) else {
            tracing::trace!(index, len = self.cues.len(), "update out of bounds ignored");
            return None;
        };
        let previous = core::mem::replace(slot, cue);
        tracing::debug!(index, "updated cue");
        self.changed(&StoreEvent::Updated { index });
        Some(Splice::new(index, 1, vec![previous]))
    }

    /// Remove every cue
    pub fn clear(&mut self) -> Splice {
        let previous = core::mem::take(&mut self.cues);
        let removed = previous.len();
        tracing::debug!(removed, "cleared store");
        self.changed(&StoreEvent::Cleared { removed });
        Splice::new(0, 0, previous)
    }

    /// Collapse cues `start..=end` into one
    ///
    /// The merged cue starts when `start` starts, ends when `end` ends and
    /// carries every text in the range concatenated without a separator.
    /// No-op when `end` is out of bounds or `start > end`.
    pub fn merge(&mut self, start: usize, end: usize) -> Option<Splice> {
        if end >= self.cues.len() || start > end {
            tracing::trace!(start, end, len = self.cues.len(), "merge range ignored");
            return None;
        }

        let text: String = self.cues[start..=end]
            .iter()
            .map(|cue| cue.text.as_str())
            .collect();
        let merged = Cue::new(self.cues[start].start, self.cues[end].end, text);
        let originals: Vec<Cue> = self.cues.splice(start..=end, [merged]).collect();

        tracing::debug!(start, end, "merged cues");
        self.changed(&StoreEvent::Merged { start, end });
        Some(Splice::new(start, 1, originals))
    }

    /// Split the cue at `index` into two at character offset `position`
    ///
    /// Both halves keep the original start and end; time is not redistributed.
    /// A position past the end of the text leaves the second half empty.
    /// No-op when `index` is out of bounds.
    pub fn split(&mut self, index: usize, position: usize) -> Option<Splice> {
        let Some(original) = self.cues.get(index) else {
            tracing::trace!(index, len = self.cues.len(), "split out of bounds ignored");
            return None;
        };

        let at = original
            .text
            .char_indices()
            .nth(position)
            .map_or(original.text.len(), |(byte, _)| byte);
        let (head, tail) = original.text.split_at(at);
        let halves = [original.with_text(head), original.with_text(tail)];
        let original = self.cues.splice(index..=index, halves).collect();

        tracing::debug!(index, position, "split cue");
        self.changed(&StoreEvent::Split { index });
        Some(Splice::new(index, 2, original))
    }

    /// Apply a recorded splice, returning the splice that reverses it
    ///
    /// This is the undo/redo primitive. No-op when the splice does not fit
    /// the current document.
    pub fn apply(&mut self, splice: Splice) -> Option<Splice> {
        if !splice.fits(self.cues.len()) {
            tracing::trace!(
                index = splice.index,
                remove = splice.remove,
                len = self.cues.len(),
                "splice does not fit document"
            );
            return None;
        }

        let Splice {
            index,
            remove,
            insert,
        } = splice;
        let inserted = insert.len();
        let removed: Vec<Cue> = self.cues.splice(index..index + remove, insert).collect();

        tracing::debug!(index, removed = remove, inserted, "applied splice");
        self.changed(&StoreEvent::Reverted {
            index,
            removed: remove,
            inserted,
        });
        Some(Splice::new(index, inserted, removed))
    }

    /// Read-only view of the current document
    ///
    /// Returns a new allocation exactly when the content changed since the
    /// previous call, so `Rc::ptr_eq` on two snapshots is a change check.
    pub fn snapshot(&mut self) -> Rc<[Cue]> {
        if self.dirty {
            self.snapshot = Rc::from(self.cues.as_slice());
            self.dirty = false;
        }
        Rc::clone(&self.snapshot)
    }

    /// Register a change listener
    #[must_use = "dropping the handle keeps the callback registered forever"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    /// Borrowed view without copy-on-read
    pub fn as_slice(&self) -> &[Cue] {
        &self.cues
    }

    /// Whether content changed since the last snapshot
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn lock_time(&mut self) {
        self.locked = true;
    }

    pub fn unlock_time(&mut self) {
        self.locked = false;
    }

    /// Reserved timecode lock state
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    fn changed(&mut self, event: &StoreEvent) {
        self.dirty = true;
        self.subscribers.notify(event);
    }
}

impl Default for SubtitleStore {
    fn default() -> Self {
        Self::new()
    }
}
