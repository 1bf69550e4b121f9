//! Configuration store client.
//!
//! The API reads two JSON rows from a key-value `config` table:
//! - `metro.defaults` holds `{ "line": ..., "tz": ... }`
//! - `metro.last` maps station names to last-departure times
//!
//! Rows are fetched fresh on every request; nothing is cached in-process.
//! The store is read-only from this crate's point of view.

mod error;
mod memory;
mod postgres;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde_json::Value;

pub use error::StoreError;
pub use memory::InMemoryConfigStore;
pub use postgres::{PgConfigStore, StoreConfig};

/// Key of the line defaults row.
pub const DEFAULTS_KEY: &str = "metro.defaults";

/// Key of the last-departure table row.
pub const LAST_METROS_KEY: &str = "metro.last";

/// Read access to the configuration store.
///
/// Object-safe so the application state can hold any implementation behind
/// an `Arc<dyn ConfigStore>`.
pub trait ConfigStore: Send + Sync {
    /// Fetch the JSON value stored under `key`.
    ///
    /// Returns `Ok(None)` when no row exists for the key.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Value>, StoreError>>;

    /// Ask the store for its current time; doubles as a liveness check.
    fn server_time(&self) -> BoxFuture<'_, Result<DateTime<Utc>, StoreError>>;
}
