use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// An instant read from the wall clock, together with the UTC offset it was
/// observed in. Formatting uses the offset, so two timestamps for the same
/// instant in different zones render differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Read the system clock in the local time zone.
    pub fn now() -> Self {
        Self(Local::now().fixed_offset())
    }

    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// Build a timestamp from calendar parts at the given UTC offset (seconds east).
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset_secs: i32,
    ) -> Result<Self> {
        let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
            Error::InvalidTimestamp(format!("UTC offset out of range: {}s", offset_secs))
        })?;
        offset
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .map(Self)
            .ok_or_else(|| {
                Error::InvalidTimestamp(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    year, month, day, hour, minute, second
                ))
            })
    }

    /// Parse an RFC 3339 string such as `2017-04-24T14:05:09+10:00`.
    pub fn parse_rfc3339(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s.trim())
            .map(Self)
            .map_err(|e| Error::InvalidTimestamp(format!("{}: {}", s, e)))
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Milliseconds from `earlier` to `self` (negative if `earlier` is later).
    pub fn millis_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_milliseconds()
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
