//! Station name types.

use std::fmt;

/// Error returned when a request carries no usable station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing station")]
pub struct MissingStation;

/// A user-supplied station name.
///
/// Station names are free text. Surrounding whitespace is trimmed and the
/// result must not be empty; otherwise casing is kept exactly as given.
/// Comparison against stored names is case-insensitive, see
/// [`StationName::matches`].
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationName;
///
/// let name = StationName::parse("  Chatelet ").unwrap();
/// assert_eq!(name.as_str(), "Chatelet");
/// assert!(name.matches("CHATELET"));
///
/// // Blank input is rejected
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationName {
    raw: String,
    folded: String,
}

impl StationName {
    /// Parse a station name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, MissingStation> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MissingStation);
        }

        Ok(Self {
            raw: trimmed.to_string(),
            folded: trimmed.to_lowercase(),
        })
    }

    /// Parse an optional query value; absent and blank are both missing.
    pub fn parse_optional(s: Option<&str>) -> Result<Self, MissingStation> {
        s.map_or(Err(MissingStation), Self::parse)
    }

    /// Returns the trimmed name as supplied by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the case-folded form used for comparisons.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Check whether a stored station key names this station, ignoring case.
    pub fn matches(&self, key: &str) -> bool {
        key.to_lowercase() == self.folded
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.raw)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let name = StationName::parse("  Nation\t").unwrap();
        assert_eq!(name.as_str(), "Nation");
        assert_eq!(name.to_string(), "Nation");
    }

    #[test]
    fn parse_keeps_casing() {
        let name = StationName::parse("chAteLet").unwrap();
        assert_eq!(name.as_str(), "chAteLet");
        assert_eq!(name.folded(), "chatelet");
    }

    #[test]
    fn reject_blank() {
        assert_eq!(StationName::parse(""), Err(MissingStation));
        assert_eq!(StationName::parse("   "), Err(MissingStation));
        assert_eq!(StationName::parse("\n\t"), Err(MissingStation));
    }

    #[test]
    fn parse_optional_rejects_absent() {
        assert_eq!(StationName::parse_optional(None), Err(MissingStation));
        assert_eq!(StationName::parse_optional(Some(" ")), Err(MissingStation));
        assert!(StationName::parse_optional(Some("Bastille")).is_ok());
    }

    #[test]
    fn matches_ignores_case_both_ways() {
        let lower = StationName::parse("chatelet").unwrap();
        let upper = StationName::parse("CHATELET").unwrap();

        assert!(lower.matches("Chatelet"));
        assert!(upper.matches("Chatelet"));
        assert!(lower.matches("CHATELET"));
        assert!(!lower.matches("Chatelet-Les-Halles"));
    }

    #[test]
    fn matches_non_ascii() {
        let name = StationName::parse("CHÂTELET").unwrap();
        assert!(name.matches("Châtelet"));
    }

    #[test]
    fn error_display() {
        assert_eq!(MissingStation.to_string(), "missing station");
    }

    #[test]
    fn debug_format() {
        let name = StationName::parse("Bastille").unwrap();
        assert_eq!(format!("{:?}", name), "StationName(Bastille)");
    }
}
