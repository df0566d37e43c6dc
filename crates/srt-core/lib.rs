//! # srt-core
//!
//! Value types and the text codec underneath the srt-rs subtitle editor.
//!
//! ## Features
//!
//! - **Validated timecodes**: [`Timecode`] can only hold in-range fields
//! - **Plain cues**: [`Cue`] is a `{start, end, text}` record with no hidden state
//! - **SubRip codec**: [`parse`] and [`serialize`] with implicit renumbering
//! - **Optional serde**: string-form timecodes behind the `serde` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use srt_core::{parse, serialize, Timecode};
//!
//! let mut cues = parse("1\n00:00:01,000 --> 00:00:03,000\nHello World!\n\n")?;
//! cues[0].end = Timecode::from_seconds(4.25)?;
//! assert_eq!(
//!     serialize(&cues),
//!     "1\n00:00:01,000 --> 00:00:04,250\nHello World!\n\n"
//! );
//! # Ok::<(), srt_core::CoreError>(())
//! ```

#![deny(unsafe_code)]

pub mod parser;
pub mod time;
pub mod utils;

pub use parser::{parse, serialize, Cue};
pub use time::{duration, TimeParts, Timecode};
pub use utils::{CoreError, Result, TimeField};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
