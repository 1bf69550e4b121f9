//! Wall-clock time handling.
//!
//! Responses carry times as "HH:MM" strings (24-hour, zero-padded) with no
//! date attached. This module provides the minute-resolution clock time and
//! the projection of the next arrival from a fixed headway.

use chrono::{DateTime, NaiveTime, TimeZone, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

use super::headway::{Headway, InvalidHeadway};

/// Minutes in a day; clock arithmetic wraps at this modulus.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day at minute resolution.
///
/// Seconds are always discarded on construction, so two instants within the
/// same minute produce equal clock times.
///
/// # Examples
///
/// ```
/// use metro_server::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("23:58").unwrap();
/// assert_eq!(t.add_minutes(5).to_string(), "00:03");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create from hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Truncate a time of day to the minute.
    pub fn from_time(time: NaiveTime) -> Self {
        // hour() and minute() are always in range, so this cannot fail.
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(NaiveTime::MIN))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("1430").is_err());
    /// assert!(ClockTime::parse_hhmm("14:3").is_err());
    /// assert!(ClockTime::parse_hhmm("25:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight (0-1439).
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Add minutes, wrapping past 23:59 back to 00:00.
    pub fn add_minutes(&self, minutes: u32) -> Self {
        let total = (self.minutes_since_midnight() + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY;
        Self::from_hm(total / 60, total % 60).unwrap_or(*self)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse exactly two ASCII digits into a number.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

/// Project the next arrival `headway` minutes after `now`.
///
/// Only the local wall clock of `now` matters: the result wraps past
/// midnight and no date is tracked.
pub fn next_arrival(now: NaiveTime, headway: Headway) -> ClockTime {
    ClockTime::from_time(now).add_minutes(headway.minutes())
}

/// Project the next arrival from an instant in some time zone.
///
/// `headway` defaults to [`Headway::DEFAULT_MINUTES`] when `None`. Zero or
/// negative values yield [`InvalidHeadway`] instead of a time.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use metro_server::domain::next_time_from;
///
/// let now = Utc.with_ymd_and_hms(2025, 9, 17, 15, 0, 0).unwrap();
/// assert_eq!(next_time_from(&now, Some(3)).unwrap().to_string(), "15:03");
/// assert_eq!(next_time_from(&now, None).unwrap().to_string(), "15:03");
/// assert!(next_time_from(&now, Some(0)).is_err());
/// ```
pub fn next_time_from<Tz: TimeZone>(
    now: &DateTime<Tz>,
    headway: Option<i64>,
) -> Result<ClockTime, InvalidHeadway> {
    let headway = Headway::or_default(headway)?;
    Ok(next_arrival(now.time(), headway))
}
