//! Core types and structures for the srt-editor
//!
//! This module contains the fundamental building blocks of the editor:
//! - `SubtitleStore`: the observable cue list and its reversible edits
//! - `EditHistory`: bounded undo/redo log
//! - `EditorDocument`: store, history and UI state wired together
//! - Error types for editor operations

pub mod document;
pub mod errors;
pub mod history;
pub mod store;

// Re-export commonly used types
pub use document::{ActionOutcome, EditorConfig, EditorDocument};
pub use errors::{EditorError, Result};
pub use history::{EditHistory, HistoryConfig, HistoryStats};
pub use store::{Splice, SubtitleStore};
