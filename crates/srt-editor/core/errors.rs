//! Error types for the srt-editor crate
//!
//! Provides the main `EditorError` enum that wraps `CoreError` from srt-core
//! and adds editor-specific error cases. Follows the same philosophy as core:
//! - Use thiserror for structured error handling (no anyhow)
//! - Provide detailed context for debugging
//!
//! Structural store edits with a bad index are not errors: they are silent
//! no-ops. `IndexOutOfBounds` is only raised by editor-level actions that
//! need to report why nothing happened.

use core::fmt;
use srt_core::CoreError;
use thiserror::Error;

/// Main error type for srt-editor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Errors from srt-core (timecode validation and parsing)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing a subtitle file failed
    #[error("IO error: {0}")]
    Io(String),

    /// File extension is not handled by any format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Command execution failed
    #[error("Command execution failed: {message}")]
    CommandFailed { message: String },

    /// Line index outside the document
    #[error("Line {index} out of bounds (document has {len} lines)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Action needs a selection and none is active
    #[error("No lines selected")]
    NothingSelected,
}

impl EditorError {
    /// Create a new command failed error
    pub fn command_failed<T: fmt::Display>(message: T) -> Self {
        Self::CommandFailed {
            message: message.to_string(),
        }
    }

    /// Create a new IO error
    pub fn io<T: fmt::Display>(message: T) -> Self {
        Self::Io(message.to_string())
    }

    /// Check if this is a timecode or file-content error
    #[must_use]
    pub const fn is_content_error(&self) -> bool {
        matches!(self, Self::Core(_))
    }

    /// Get the underlying core error if this wraps one
    #[must_use]
    pub const fn as_core_error(&self) -> Option<&CoreError> {
        match self {
            Self::Core(core_err) => Some(core_err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for editor operations
pub type Result<T> = core::result::Result<T, EditorError>;
