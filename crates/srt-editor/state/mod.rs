//! Observable UI state
//!
//! Every field the host UI binds to is an explicit [`ValueCell`], so a widget
//! can subscribe to exactly the value it renders. `UiState` groups the cells
//! the editor shares with the host; its defaults are the start-up state of a
//! fresh editor window.

pub mod timecode_field;

pub use timecode_field::TimecodeField;

use crate::events::{Subscribers, Subscription};
use core::fmt;
use std::path::PathBuf;

/// Single observable value
///
/// Every `set` notifies subscribers with the new value, even when it equals
/// the old one.
pub struct ValueCell<T> {
    value: T,
    subscribers: Subscribers<T>,
}

impl<T: Clone + 'static> ValueCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Subscribers::new(),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Borrow the current value without cloning
    pub fn borrow(&self) -> &T {
        &self.value
    }

    /// Store a new value and notify subscribers
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.subscribers.notify(&self.value);
    }

    /// Store a new value, returning the previous one
    pub fn replace(&mut self, value: T) -> T {
        let previous = core::mem::replace(&mut self.value, value);
        self.subscribers.notify(&self.value);
        previous
    }

    /// Modify the value in place and notify once
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.subscribers.notify(&self.value);
    }

    /// Register a callback run with the new value after every change
    #[must_use = "dropping the handle keeps the callback registered forever"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        self.subscribers.subscribe(callback)
    }
}

impl<T: Clone + Default + 'static> Default for ValueCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueCell").field(&self.value).finish()
    }
}

/// State shared between the editor and its host UI
#[derive(Debug)]
pub struct UiState {
    /// Interface language code
    pub ui_language: ValueCell<String>,

    pub file_open: ValueCell<bool>,
    /// Unsaved edits exist
    pub file_dirty: ValueCell<bool>,
    /// Mirrors the store's reserved timecode lock
    pub file_locked: ValueCell<bool>,
    /// Path the document was opened from or last saved to
    pub subtitle_file: ValueCell<Option<PathBuf>>,

    pub video_open: ValueCell<bool>,
    pub video_file: ValueCell<Option<PathBuf>>,
    /// Playback position in seconds
    pub video_position: ValueCell<f64>,
    /// Media length in seconds
    pub video_duration: ValueCell<f64>,
    /// Volume in `0.0..=1.0`
    pub video_volume: ValueCell<f64>,
    pub video_muted: ValueCell<bool>,

    /// Translation source language code
    pub source_language: ValueCell<String>,
    /// Translation target language code
    pub target_language: ValueCell<String>,

    /// Selected line indices, `None` when nothing is selected
    pub selection: ValueCell<Option<Vec<usize>>>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            ui_language: ValueCell::new("en".to_string()),
            file_open: ValueCell::new(false),
            file_dirty: ValueCell::new(false),
            file_locked: ValueCell::new(true),
            subtitle_file: ValueCell::new(None),
            video_open: ValueCell::new(false),
            video_file: ValueCell::new(None),
            video_position: ValueCell::new(0.0),
            video_duration: ValueCell::new(0.0),
            video_volume: ValueCell::new(0.5),
            video_muted: ValueCell::new(false),
            source_language: ValueCell::new("en".to_string()),
            target_language: ValueCell::new("zh".to_string()),
            selection: ValueCell::new(None),
        }
    }

    /// Last selected line, the anchor for "insert after"
    pub fn last_selected(&self) -> Option<usize> {
        self.selection
            .borrow()
            .as_ref()
            .and_then(|lines| lines.last().copied())
    }

    /// First selected line, the anchor for "insert before"
    pub fn first_selected(&self) -> Option<usize> {
        self.selection
            .borrow()
            .as_ref()
            .and_then(|lines| lines.first().copied())
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn defaults_match_a_fresh_window() {
        let state = UiState::new();
        assert_eq!(state.ui_language.get(), "en");
        assert!(!state.file_open.get());
        assert!(!state.file_dirty.get());
        assert!(state.file_locked.get());
        assert_eq!(state.video_volume.get(), 0.5);
        assert_eq!(state.source_language.get(), "en");
        assert_eq!(state.target_language.get(), "zh");
        assert_eq!(state.selection.get(), None);
    }

    #[test]
    fn set_notifies_with_new_value() {
        let mut cell = ValueCell::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handle = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(2);
        cell.set(2);
        assert_eq!(cell.replace(3), 2);
        cell.update(|v| *v += 1);

        assert!(handle.unsubscribe());
        cell.set(10);
        assert_eq!(*seen.borrow(), vec![2, 2, 3, 4]);
        assert_eq!(cell.get(), 10);
    }

    #[test]
    fn selection_anchors() {
        let mut state = UiState::new();
        assert_eq!(state.last_selected(), None);
        state.selection.set(Some(vec![2, 5, 7]));
        assert_eq!(state.first_selected(), Some(2));
        assert_eq!(state.last_selected(), Some(7));
        state.selection.set(Some(Vec::new()));
        assert_eq!(state.last_selected(), None);
    }
}
