//! Validated, immutable subtitle timecodes
//!
//! A [`Timecode`] is a point in time split into hours, minutes, seconds and
//! milliseconds. Every constructor validates the fields, so a `Timecode` value
//! is always in range: minutes and seconds below 60, milliseconds below 1000.
//!
//! # Example
//!
//! ```rust
//! use srt_core::time::{duration, Timecode};
//!
//! let start = Timecode::parse("00:00:01,250")?;
//! let end = Timecode::from_seconds(3661.5)?;
//! assert_eq!(end.to_string(), "01:01:01,500");
//! assert!((duration(&start, &end) - 3660.25).abs() < 1e-9);
//! # Ok::<(), srt_core::CoreError>(())
//! ```

use crate::utils::{CoreError, Result, TimeField};
use core::fmt;
use core::str::FromStr;

const FIELDS: [TimeField; 4] = [
    TimeField::Hours,
    TimeField::Minutes,
    TimeField::Seconds,
    TimeField::Milliseconds,
];

/// Plain copy of the four timecode fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeParts {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

/// Immutable point in time with hour/minute/second/millisecond fields
///
/// Ordering is lexicographic on (hours, minutes, seconds, milliseconds),
/// which matches chronological order because every field is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode {
    hours: u32,
    minutes: u32,
    seconds: u32,
    milliseconds: u32,
}

impl Timecode {
    /// `00:00:00,000`
    pub const ZERO: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
    };

    /// Parse a `HH:MM:SS,mmm` string
    ///
    /// Fields are separated by `:` and `,` and read in order. Missing trailing
    /// fields default to zero, so `"01"` is one hour, and so do blank fields,
    /// so `"01:30:"` is one hour thirty. Surrounding whitespace on each field
    /// is ignored. Numeric fields after the fourth are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFormat`] if any field is non-numeric, and
    /// [`CoreError::OutOfRange`] if one of the first four fields is negative or
    /// exceeds its modulus.
    pub fn parse(text: &str) -> Result<Self> {
        // Shape is checked for every field before any range check
        let mut values = [0_i128; 4];
        for (slot, raw) in text.split([':', ',']).enumerate() {
            let value = parse_field(raw, text)?;
            if let Some(target) = values.get_mut(slot) {
                *target = value;
            }
        }

        let mut checked = [0_u32; 4];
        for ((slot, value), field) in values.iter().enumerate().zip(FIELDS) {
            checked[slot] = check_field(field, *value)?;
        }

        Ok(Self {
            hours: checked[0],
            minutes: checked[1],
            seconds: checked[2],
            milliseconds: checked[3],
        })
    }

    /// Build a timecode from a number of seconds
    ///
    /// The fractional part becomes milliseconds and is truncated, never rounded.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] for negative input or when the hour
    /// count does not fit in a `u32`, and [`CoreError::InvalidFormat`] for
    /// NaN or infinite input.
    pub fn from_seconds(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(CoreError::invalid_format(
                value.to_string(),
                "seconds must be a finite number",
            ));
        }

        let hours = (value / 3600.0).floor();
        if value < 0.0 || hours > f64::from(u32::MAX) {
            return Err(CoreError::out_of_range(TimeField::Hours, hours as i128));
        }

        let minutes = ((value % 3600.0) / 60.0).floor();
        let seconds = (value % 60.0).floor();
        let milliseconds = ((value % 1.0) * 1000.0).floor();

        Self::from_fields(
            hours as u32,
            minutes as u32,
            seconds as u32,
            milliseconds as u32,
        )
    }

    /// Build a timecode from a total number of milliseconds
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] when the hour count does not fit in a `u32`.
    pub fn from_milliseconds(total: u64) -> Result<Self> {
        let hours = total / 3_600_000;
        let hours = u32::try_from(hours)
            .map_err(|_| CoreError::out_of_range(TimeField::Hours, i128::from(hours)))?;

        Ok(Self {
            hours,
            minutes: ((total % 3_600_000) / 60_000) as u32,
            seconds: ((total % 60_000) / 1000) as u32,
            milliseconds: (total % 1000) as u32,
        })
    }

    /// Build a timecode from its four fields
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] if minutes or seconds are 60 or more,
    /// or milliseconds are 1000 or more.
    pub fn from_fields(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Result<Self> {
        Ok(Self {
            hours: check_field(TimeField::Hours, i128::from(hours))?,
            minutes: check_field(TimeField::Minutes, i128::from(minutes))?,
            seconds: check_field(TimeField::Seconds, i128::from(seconds))?,
            milliseconds: check_field(TimeField::Milliseconds, i128::from(milliseconds))?,
        })
    }

    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub const fn milliseconds(&self) -> u32 {
        self.milliseconds
    }

    /// All four fields as a plain struct
    #[must_use]
    pub const fn to_time(&self) -> TimeParts {
        TimeParts {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            milliseconds: self.milliseconds,
        }
    }

    /// Total time in seconds, milliseconds as the fractional part
    #[must_use]
    pub fn to_seconds(&self) -> f64 {
        f64::from(self.hours) * 3600.0
            + f64::from(self.minutes) * 60.0
            + f64::from(self.seconds)
            + f64::from(self.milliseconds) / 1000.0
    }

    /// Total time in whole milliseconds
    #[must_use]
    pub const fn total_milliseconds(&self) -> u64 {
        self.hours as u64 * 3_600_000
            + self.minutes as u64 * 60_000
            + self.seconds as u64 * 1000
            + self.milliseconds as u64
    }

    /// Hours zero-padded to at least two digits
    #[must_use]
    pub fn hours_string(&self) -> String {
        format!("{:02}", self.hours)
    }

    /// Minutes zero-padded to two digits
    #[must_use]
    pub fn minutes_string(&self) -> String {
        format!("{:02}", self.minutes)
    }

    /// Seconds zero-padded to two digits
    #[must_use]
    pub fn seconds_string(&self) -> String {
        format!("{:02}", self.seconds)
    }

    /// Milliseconds zero-padded to three digits
    #[must_use]
    pub fn milliseconds_string(&self) -> String {
        format!("{:03}", self.milliseconds)
    }
}

/// Signed distance in seconds from `from` to `to`
///
/// No ordering is required: a `to` earlier than `from` yields a negative value.
#[must_use]
pub fn duration(from: &Timecode, to: &Timecode) -> f64 {
    to.to_seconds() - from.to_seconds()
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

impl FromStr for Timecode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Timecode> for TimeParts {
    fn from(timecode: Timecode) -> Self {
        timecode.to_time()
    }
}

impl TryFrom<TimeParts> for Timecode {
    type Error = CoreError;

    fn try_from(parts: TimeParts) -> Result<Self> {
        Self::from_fields(parts.hours, parts.minutes, parts.seconds, parts.milliseconds)
    }
}

/// Read one field as a signed integer, blank as zero, rejecting anything non-numeric
fn parse_field(raw: &str, input: &str) -> Result<i128> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_format(
            input,
            format!("non-numeric field {raw:?}"),
        ));
    }

    // Digits only, so the sole failure left is overflow
    let magnitude = digits.parse::<i128>().unwrap_or(i128::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

fn check_field(field: TimeField, value: i128) -> Result<u32> {
    let within_modulus = field
        .modulus()
        .map_or(true, |modulus| value < i128::from(modulus));

    match u32::try_from(value) {
        Ok(valid) if within_modulus => Ok(valid),
        _ => Err(CoreError::out_of_range(field, value)),
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Timecode;
    use serde::de::{self, Deserialize, Deserializer, Visitor};
    use serde::{Serialize, Serializer};

    impl Serialize for Timecode {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    struct TimecodeVisitor;

    impl Visitor<'_> for TimecodeVisitor {
        type Value = Timecode;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a timecode string in HH:MM:SS,mmm form")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Timecode, E> {
            Timecode::parse(value).map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for Timecode {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(TimecodeVisitor)
        }
    }
}
