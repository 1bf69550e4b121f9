//! Last-departure lookup against the configuration store.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::StationName;
use crate::store::{ConfigStore, DEFAULTS_KEY, LAST_METROS_KEY, StoreError};

use super::table::{Defaults, LastMetroTable};

/// Errors from a last-departure lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The `metro.defaults` row is absent
    #[error("missing defaults in config")]
    MissingDefaults,

    /// The `metro.last` row is absent
    #[error("missing last metros in config")]
    MissingLastMetros,

    /// No station matches, ignoring case
    #[error("station not found")]
    StationNotFound,

    /// A config row exists but has the wrong shape
    #[error("malformed config value for {key}: {message}")]
    MalformedConfig { key: &'static str, message: String },

    /// The store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastMetro {
    /// Station name as stored in the table
    pub station: String,

    /// Last departure time as stored
    pub last_metro: String,

    /// Line defaults
    pub defaults: Defaults,
}

/// Look up the last departure for a station.
///
/// Both rows are read fresh from the store on every call. Defaults are read
/// first, so a store missing both rows reports [`LookupError::MissingDefaults`].
pub async fn last_metro(
    store: &dyn ConfigStore,
    station: &StationName,
) -> Result<LastMetro, LookupError> {
    let defaults: Defaults = fetch(store, DEFAULTS_KEY)
        .await?
        .ok_or(LookupError::MissingDefaults)?;

    let table: LastMetroTable = fetch(store, LAST_METROS_KEY)
        .await?
        .ok_or(LookupError::MissingLastMetros)?;

    let collisions = table.case_collisions();
    if !collisions.is_empty() {
        warn!(?collisions, "last-metro table has station names differing only by case");
    }

    let entry = table
        .resolve(station)
        .ok_or(LookupError::StationNotFound)?;

    debug!(requested = %station, resolved = entry.station, "resolved station");

    Ok(LastMetro {
        station: entry.station.to_string(),
        last_metro: entry.last_metro.to_string(),
        defaults,
    })
}

/// Fetch and decode one config row.
async fn fetch<T: DeserializeOwned>(
    store: &dyn ConfigStore,
    key: &'static str,
) -> Result<Option<T>, LookupError> {
    let Some(value) = store.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| LookupError::MalformedConfig {
            key,
            message: e.to_string(),
        })
}
