//! Subtitle cue record

use crate::time::{duration, Timecode};

/// One subtitle entry: a start time, an end time and its text
///
/// `start <= end` is not enforced; editors may hold inverted cues while the
/// user is still adjusting times.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cue {
    /// When the cue appears
    pub start: Timecode,
    /// When the cue disappears
    pub end: Timecode,
    /// Displayed text, lines separated by `\n`
    pub text: String,
}

impl Cue {
    /// Create a new cue
    pub fn new(start: Timecode, end: Timecode, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Zero-length cue at `00:00:00,000` with no text
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Signed display duration in seconds
    #[must_use]
    pub fn duration(&self) -> f64 {
        duration(&self.start, &self.end)
    }

    /// Copy of this cue with different text
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            start: self.start,
            end: self.end,
            text: text.into(),
        }
    }

    /// Number of characters (not bytes) in the text
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn cue_serializes_with_string_timecodes() {
        let cue = Cue::new(
            Timecode::parse("00:00:01,000").unwrap(),
            Timecode::parse("00:00:02,500").unwrap(),
            "Hello\nthere",
        );
        let json = serde_json::to_string(&cue).unwrap();
        assert_eq!(
            json,
            r#"{"start":"00:00:01,000","end":"00:00:02,500","text":"Hello\nthere"}"#
        );
        assert_eq!(serde_json::from_str::<Cue>(&json).unwrap(), cue);
    }
}
