//! Undoable subtitle editing on top of `srt-core`
//!
//! `srt-editor` holds everything between the SubRip codec and a user
//! interface: the cue list with its change notifications, a bounded undo log,
//! observable UI state, menu and shortcut dispatch, drag selection and the
//! seam for plugging in a translation service.
//!
//! # Features
//!
//! - **Reversible edits**: every store mutation returns the splice that undoes it
//! - **Undo/redo**: linear history with configurable depth (100 by default)
//! - **Change notification**: synchronous subscribers with explicit unsubscribe
//! - **Observable UI state**: one [`ValueCell`] per field the host binds to
//! - **Menus**: data-only menu tree with platform-aware shortcuts
//! - **Optional serde**: configuration and cues behind the `serde` feature
//!
//! # Example
//!
//! ```
//! use srt_editor::{EditorDocument, StoreEdit};
//! use srt_core::{Cue, Timecode};
//!
//! let mut doc = EditorDocument::new();
//! doc.execute(StoreEdit::Push(Cue::new(
//!     Timecode::ZERO,
//!     Timecode::from_seconds(2.0)?,
//!     "Hello world",
//! )))?;
//! doc.split_line(0, 5)?;
//! assert_eq!(doc.store().len(), 2);
//!
//! doc.undo()?;
//! assert_eq!(doc.to_srt(), "1\n00:00:00,000 --> 00:00:02,000\nHello world\n\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub mod commands;
pub mod core;
pub mod events;
pub mod formats;
pub mod menu;
pub mod selection;
pub mod state;
pub mod translate;

// Re-export srt-core types as first-class citizens
pub use srt_core::{Cue, Timecode};

// Public API exports
pub use commands::{BatchCommand, EditCommand, StoreCommand, StoreEdit};
pub use crate::core::{
    ActionOutcome, EditHistory, EditorConfig, EditorDocument, EditorError, HistoryConfig,
    HistoryStats, Result, Splice, SubtitleStore,
};
pub use events::{StoreEvent, Subscribers, Subscription};
pub use formats::{FormatInfo, SrtFormat};
pub use menu::{
    default_menus, find_action, EditorAction, KeyChord, Menu, MenuItem, Modifiers, Platform,
    Shortcut,
};
pub use selection::{Rect, SelectionRegistry, SlotKey};
pub use state::{TimecodeField, UiState, ValueCell};
pub use translate::{build_prompt, Glossary, Translator};
