//! Core error type for srt-core operations
//!
//! Timecode construction and codec parsing share one error enum. The codec
//! never wraps or re-contextualizes a timecode failure: a malformed timestamp
//! in a file surfaces as exactly the error `Timecode::parse` produced.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow`)
//! - Keep the offending input on the error for user feedback
//! - Never leave a partially-valid value behind a failure

use core::fmt;
use thiserror::Error;

/// Individual field of a timecode, used to report range violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl TimeField {
    /// Exclusive upper bound of the field, `None` for unbounded hours
    #[must_use]
    pub const fn modulus(self) -> Option<u64> {
        match self {
            Self::Hours => None,
            Self::Minutes | Self::Seconds => Some(60),
            Self::Milliseconds => Some(1000),
        }
    }

    /// Field name as shown in error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Main error type for srt-core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Input is not shaped like a timecode or a subtitle block
    #[error("Invalid format: {input:?}: {reason}")]
    InvalidFormat { input: String, reason: String },

    /// A timecode field is negative or exceeds its modulus
    #[error("Timecode {field} out of range: {value}")]
    OutOfRange { field: TimeField, value: i128 },
}

impl CoreError {
    /// Create an invalid format error
    pub fn invalid_format<I: Into<String>, R: fmt::Display>(input: I, reason: R) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an out of range error for a timecode field
    #[must_use]
    pub const fn out_of_range(field: TimeField, value: i128) -> Self {
        Self::OutOfRange { field, value }
    }

    /// Check if this is a format (shape) error
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }

    /// Check if this is a range error
    #[must_use]
    pub const fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Result type alias for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
