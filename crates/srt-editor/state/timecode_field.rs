//! Text buffer for editing one timecode

use crate::core::errors::Result;
use srt_core::Timecode;

/// Editable text over a committed timecode
///
/// The buffer may hold anything while the user types. Committing parses it;
/// on failure the buffer reverts to the last valid value and the committed
/// timecode is left alone.
///
/// # Examples
///
/// ```
/// use srt_editor::TimecodeField;
/// use srt_core::Timecode;
///
/// let mut field = TimecodeField::new(Timecode::ZERO);
/// field.set_input("00:61:00,000");
/// assert!(field.commit().is_err());
/// assert_eq!(field.input(), "00:00:00,000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimecodeField {
    input: String,
    value: Timecode,
}

impl TimecodeField {
    pub fn new(value: Timecode) -> Self {
        Self {
            input: value.to_string(),
            value,
        }
    }

    /// Replace the buffer with what the user typed
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Last successfully committed timecode
    pub const fn value(&self) -> Timecode {
        self.value
    }

    /// Parse the buffer into a new committed value
    ///
    /// # Errors
    ///
    /// Returns the parse error after reverting the buffer.
    pub fn commit(&mut self) -> Result<Timecode> {
        match Timecode::parse(&self.input) {
            Ok(value) => {
                self.value = value;
                self.input = value.to_string();
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(input = %self.input, error = %err, "reverting invalid timecode");
                self.input = self.value.to_string();
                Err(err.into())
            }
        }
    }

    /// Show a value set from outside, discarding pending input
    pub fn reset(&mut self, value: Timecode) {
        self.value = value;
        self.input = value.to_string();
    }

    /// Whether the buffer differs from the committed value
    pub fn is_pending(&self) -> bool {
        self.input != self.value.to_string()
    }
}

impl Default for TimecodeField {
    fn default() -> Self {
        Self::new(Timecode::ZERO)
    }
}
