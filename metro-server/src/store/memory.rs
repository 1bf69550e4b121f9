//! In-memory configuration store for tests and local development.
//!
//! Serves JSON values from a map as if they were rows of the `config`
//! table. Can also be switched into an "unreachable" mode to exercise the
//! error paths of the handlers.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::{ConfigStore, DEFAULTS_KEY, LAST_METROS_KEY};

/// Configuration store backed by a shared map.
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
    unreachable: Option<String>,
}

impl InMemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given entries. Later duplicates replace
    /// earlier ones.
    pub fn from_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            entries: Arc::new(RwLock::new(entries)),
            unreachable: None,
        }
    }

    /// Create a store seeded with line defaults and a last-departure table.
    pub fn seeded(defaults: Value, last_metros: Value) -> Self {
        Self::from_entries([(DEFAULTS_KEY, defaults), (LAST_METROS_KEY, last_metros)])
    }

    /// Create a store whose every call fails with `Unavailable`.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            entries: Arc::default(),
            unreachable: Some(reason.into()),
        }
    }

    /// Load entries from a JSON file holding an object of key → value.
    ///
    /// ```json
    /// { "metro.defaults": { "line": "M1", "tz": "Europe/Paris" },
    ///   "metro.last": { "Chatelet": "00:40" } }
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Unavailable(format!("failed to read {}: {}", path.display(), e))
        })?;

        let entries: HashMap<String, Value> =
            serde_json::from_str(&json).map_err(|e| StoreError::Decode {
                key: path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            unreachable: None,
        })
    }

    /// Add or replace an entry. Visible through every clone of this store.
    pub async fn insert(&self, key: impl Into<String>, value: Value) {
        self.entries.write().await.insert(key.into(), value);
    }

    /// Remove an entry, returning its previous value.
    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.entries.write().await.remove(key)
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        match &self.unreachable {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Value>, StoreError>> {
        Box::pin(async move {
            self.check_reachable()?;
            let entries = self.entries.read().await;
            Ok(entries.get(key).cloned())
        })
    }

    fn server_time(&self) -> BoxFuture<'_, Result<DateTime<Utc>, StoreError>> {
        Box::pin(async move {
            self.check_reachable()?;
            Ok(Utc::now())
        })
    }
}
