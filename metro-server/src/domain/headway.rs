//! Headway between successive departures.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;

/// Error returned when a headway is not a positive whole number of minutes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid headway")]
pub struct InvalidHeadway;

/// Fixed interval between departures, in minutes.
///
/// Always strictly positive.
///
/// # Examples
///
/// ```
/// use metro_server::domain::Headway;
///
/// assert_eq!(Headway::default().minutes(), 3);
/// assert_eq!(Headway::parse("5").unwrap().minutes(), 5);
///
/// assert!(Headway::new(0).is_err());
/// assert!(Headway::new(-5).is_err());
/// assert!(Headway::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Headway(u32);

impl Headway {
    /// Headway used when the caller does not supply one.
    pub const DEFAULT_MINUTES: u32 = 3;

    /// Create a headway from a signed minute count.
    pub fn new(minutes: i64) -> Result<Self, InvalidHeadway> {
        if minutes <= 0 {
            return Err(InvalidHeadway);
        }
        u32::try_from(minutes).map(Self).map_err(|_| InvalidHeadway)
    }

    /// Parse a headway from text, e.g. a query parameter.
    ///
    /// Accepts a whole number, or a finite decimal with no fractional part
    /// (`"3.0"`). Anything else is invalid.
    pub fn parse(s: &str) -> Result<Self, InvalidHeadway> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Self::new(n);
        }

        let f: f64 = s.parse().map_err(|_| InvalidHeadway)?;
        if !f.is_finite() || f.fract() != 0.0 {
            return Err(InvalidHeadway);
        }
        Self::new(f as i64)
    }

    /// Resolve an optional headway, falling back to the default.
    pub fn or_default(minutes: Option<i64>) -> Result<Self, InvalidHeadway> {
        minutes.map_or(Ok(Self::default()), Self::new)
    }

    /// Returns the headway in minutes.
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Returns the headway as a Duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }
}

impl Default for Headway {
    fn default() -> Self {
        Self(Self::DEFAULT_MINUTES)
    }
}

impl FromStr for Headway {
    type Err = InvalidHeadway;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Headway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}
