//! SubRip (SRT) text codec
//!
//! Converts between the block-based SubRip interchange format and an ordered
//! list of [`Cue`]s:
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:02,500
//! First line
//! second line
//!
//! 2
//! ...
//! ```
//!
//! Index lines are informational on read and regenerated on write, so
//! serialized output is always numbered `1..=n` in document order.
//!
//! # Limitations
//!
//! Block structure is not validated beyond what is needed to find the timing
//! line. Cue text containing a blank line (`"\n\n"`) is read back as two blocks,
//! and leading or trailing whitespace of a cue's text is trimmed on read.
//!
//! # Example
//!
//! ```rust
//! use srt_core::parser::{parse, serialize};
//!
//! let cues = parse("1\n00:00:01,000 --> 00:00:02,000\nHello\n\n")?;
//! assert_eq!(cues[0].text, "Hello");
//! assert_eq!(serialize(&cues), "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n");
//! # Ok::<(), srt_core::CoreError>(())
//! ```

pub mod ast;

pub use ast::Cue;

use crate::time::Timecode;
use crate::utils::{CoreError, Result};
use core::fmt::Write as _;

/// Separator between the start and end timecodes of a block
pub const ARROW: &str = "-->";

/// Separator between blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

const BOM: char = '\u{feff}';

/// Parse SubRip text into cues
///
/// # Errors
///
/// Returns the [`Timecode::parse`] error of the first malformed timestamp, or
/// [`CoreError::InvalidFormat`] for a non-empty block without a timing line.
pub fn parse(text: &str) -> Result<Vec<Cue>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let normalized;
    let text = if text.contains('\r') {
        normalized = text.replace("\r\n", "\n");
        normalized.as_str()
    } else {
        text
    };

    let mut cues = Vec::new();
    for block in text.split(BLOCK_SEPARATOR) {
        if let Some(cue) = parse_block(block)? {
            cues.push(cue);
        }
    }

    tracing::debug!(cues = cues.len(), bytes = text.len(), "parsed subrip text");
    Ok(cues)
}

/// Parse a single block, `None` when its index line is blank
fn parse_block(block: &str) -> Result<Option<Cue>> {
    // Extra blank lines between blocks would otherwise hide the next index line
    let block = block.trim_start_matches('\n');
    let mut lines = block.split('\n');

    let index = lines.next().unwrap_or_default();
    if index.trim().is_empty() {
        return Ok(None);
    }

    let timing = lines
        .next()
        .ok_or_else(|| CoreError::invalid_format(block, "missing timing line"))?;
    let (start, end) = timing
        .split_once(ARROW)
        .ok_or_else(|| CoreError::invalid_format(timing, "missing \"-->\" separator"))?;

    let start = Timecode::parse(start.trim())?;
    let end = Timecode::parse(end.trim())?;
    let text = lines.collect::<Vec<_>>().join("\n");

    Ok(Some(Cue::new(start, end, text.trim())))
}

/// Serialize cues as SubRip text, numbering blocks from 1
#[must_use]
pub fn serialize(cues: &[Cue]) -> String {
    let mut out = String::with_capacity(cues.iter().map(|cue| cue.text.len() + 40).sum());
    for (index, cue) in cues.iter().enumerate() {
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "{}\n{} {ARROW} {}\n{}{BLOCK_SEPARATOR}",
            index + 1,
            cue.start,
            cue.end,
            cue.text
        );
    }
    out
}
