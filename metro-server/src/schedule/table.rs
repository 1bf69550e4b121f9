//! Configuration snapshots and the station resolver.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::StationName;

/// Line-wide defaults stored under `metro.defaults`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Line identifier, e.g. "M1"
    pub line: String,

    /// IANA time zone of the published times, e.g. "Europe/Paris"
    pub tz: String,
}

/// A resolved entry of the last-departure table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMetroEntry<'a> {
    /// Station name with the casing it has in the table
    pub station: &'a str,

    /// Last departure time as stored
    pub last_metro: &'a str,
}

/// Last departure time per station, stored under `metro.last`.
///
/// Keys are expected to be unique ignoring case. The configuration store
/// must uphold this; if two keys differ only by case, [`resolve`] returns
/// the first in iteration order.
///
/// [`resolve`]: LastMetroTable::resolve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LastMetroTable(BTreeMap<String, String>);

impl LastMetroTable {
    /// Build a table from (station, time) pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Find the entry whose key equals `station` ignoring case.
    ///
    /// ```
    /// use metro_server::domain::StationName;
    /// use metro_server::schedule::LastMetroTable;
    ///
    /// let table = LastMetroTable::from_entries([("Chatelet", "00:40")]);
    /// let station = StationName::parse("chatelet").unwrap();
    ///
    /// let entry = table.resolve(&station).unwrap();
    /// assert_eq!(entry.station, "Chatelet");
    /// assert_eq!(entry.last_metro, "00:40");
    /// ```
    pub fn resolve(&self, station: &StationName) -> Option<LastMetroEntry<'_>> {
        self.0
            .iter()
            .find(|(key, _)| station.matches(key))
            .map(|(key, time)| LastMetroEntry {
                station: key,
                last_metro: time,
            })
    }

    /// Stations whose names collide when case is ignored.
    ///
    /// Each inner list holds two or more keys; an empty result means the
    /// table is well formed.
    pub fn case_collisions(&self) -> Vec<Vec<&str>> {
        let mut groups: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for key in self.0.keys() {
            groups.entry(key.to_lowercase()).or_default().push(key);
        }
        groups.into_values().filter(|g| g.len() > 1).collect()
    }

    /// Number of stations in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn station(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn paris() -> LastMetroTable {
        LastMetroTable::from_entries([
            ("Chatelet", "00:40"),
            ("Bastille", "00:45"),
            ("La Défense", "00:30"),
        ])
    }

    #[test]
    fn resolve_exact_case() {
        let table = paris();
        let entry = table.resolve(&station("Bastille")).unwrap();
        assert_eq!(entry.station, "Bastille");
        assert_eq!(entry.last_metro, "00:45");
    }

    #[test]
    fn resolve_returns_canonical_key() {
        let table = paris();
        for input in ["chatelet", "CHATELET", "ChAtElEt"] {
            let entry = table.resolve(&station(input)).unwrap();
            assert_eq!(entry.station, "Chatelet");
            assert_eq!(entry.last_metro, "00:40");
        }
    }

    #[test]
    fn resolve_non_ascii_case() {
        let table = paris();
        let entry = table.resolve(&station("LA DÉFENSE")).unwrap();
        assert_eq!(entry.station, "La Défense");
    }

    #[test]
    fn resolve_unknown_station() {
        let table = paris();
        assert!(table.resolve(&station("StationInexistante")).is_none());
        assert!(table.resolve(&station("Chat")).is_none());
    }

    #[test]
    fn resolve_empty_table() {
        let table = LastMetroTable::default();
        assert!(table.is_empty());
        assert!(table.resolve(&station("Chatelet")).is_none());
    }

    #[test]
    fn duplicate_keys_pick_first() {
        let table = LastMetroTable::from_entries([("CHATELET", "00:10"), ("Chatelet", "00:40")]);
        let entry = table.resolve(&station("chatelet")).unwrap();
        // BTreeMap order: uppercase sorts first
        assert_eq!(entry.station, "CHATELET");
        assert_eq!(table.case_collisions(), vec![vec!["CHATELET", "Chatelet"]]);
    }

    #[test]
    fn well_formed_table_has_no_collisions() {
        assert!(paris().case_collisions().is_empty());
    }

    #[test]
    fn deserialize_from_config_json() {
        let table: LastMetroTable =
            serde_json::from_value(json!({"Chatelet": "00:40", "Nation": "00:50"})).unwrap();
        assert_eq!(table.len(), 2);

        let defaults: Defaults =
            serde_json::from_value(json!({"line": "M1", "tz": "Europe/Paris"})).unwrap();
        assert_eq!(defaults.line, "M1");
        assert_eq!(defaults.tz, "Europe/Paris");
    }

    #[test]
    fn deserialize_rejects_wrong_shape() {
        assert!(serde_json::from_value::<LastMetroTable>(json!(["Chatelet"])).is_err());
        assert!(serde_json::from_value::<LastMetroTable>(json!({"Chatelet": 40})).is_err());
        assert!(serde_json::from_value::<Defaults>(json!({"line": "M1"})).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Flip the case of characters selected by `mask`.
    fn recase(s: &str, mask: &[bool]) -> String {
        s.chars()
            .zip(mask.iter().cycle())
            .map(|(c, &upper)| {
                if upper {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    }

    proptest! {
        /// Inputs differing only in case resolve to the same canonical entry
        #[test]
        fn case_insensitive_both_ways(
            name in "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]",
            mask in proptest::collection::vec(any::<bool>(), 1..8),
        ) {
            let table = LastMetroTable::from_entries([(name.clone(), "00:40".to_string())]);
            let variant = StationName::parse(&recase(&name, &mask)).unwrap();

            let entry = table.resolve(&variant);
            prop_assert!(entry.is_some());
            prop_assert_eq!(entry.unwrap().station, name.as_str());
        }
    }
}
