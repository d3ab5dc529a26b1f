//! Schedule time - minute-resolution local wall-clock time
//!
//! The command layer exchanges times as `YYYY-MM-DD HH:MM` strings,
//! interpreted in the process's local time zone.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// A point in local time, truncated to the minute
///
/// Ordering follows the calendar, which lets the scheduler keep entries in a
/// sorted map and pull every due entry with a single range split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleTime(NaiveDateTime);

impl ScheduleTime {
    /// Wire format shared with the command layer
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M";

    /// Human-readable form of [`Self::FORMAT`]
    pub const FORMAT_HINT: &'static str = "YYYY-MM-DD HH:MM";

    /// Parse a `YYYY-MM-DD HH:MM` string
    pub fn parse(s: &str) -> Result<Self, ScheduleTimeError> {
        NaiveDateTime::parse_from_str(s.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| ScheduleTimeError::InvalidFormat(s.trim().to_string()))
    }

    /// The underlying local date-time
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Whether this time lies strictly after `now`
    pub fn is_after(&self, now: NaiveDateTime) -> bool {
        self.0 > now
    }

    /// Whether this time has been reached at `now`
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.0 <= now
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for ScheduleTime {
    type Err = ScheduleTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error when parsing a schedule time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleTimeError {
    #[error("invalid time '{0}', expected YYYY-MM-DD HH:MM")]
    InvalidFormat(String),
}
