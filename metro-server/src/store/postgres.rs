//! PostgreSQL-backed configuration store.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use super::error::StoreError;
use super::ConfigStore;

/// Default maximum pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection, in seconds.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Connection settings for the configuration database.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Login role
    pub user: String,
    /// Login password
    pub password: String,
    /// Database name
    pub database: String,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// Seconds to wait for a connection before giving up
    pub acquire_timeout_secs: u64,
}

impl StoreConfig {
    /// Create a config for the given host and database with default credentials.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            database: database.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }

    /// Set login credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Set the database port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set maximum pooled connections.
    pub fn with_max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Set the connection acquire timeout.
    pub fn with_acquire_timeout(mut self, secs: u64) -> Self {
        self.acquire_timeout_secs = secs;
        self
    }

    /// Build sqlx connection options.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("localhost", "metrodb")
    }
}

/// Configuration store reading the `config` table through a connection pool.
///
/// The pool connects lazily, so constructing the store never touches the
/// network. Connection errors surface on the first query instead.
#[derive(Debug, Clone)]
pub struct PgConfigStore {
    pool: PgPool,
}

impl PgConfigStore {
    /// Create a store with a lazily connecting pool.
    pub fn new(config: &StoreConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(config.connect_options());

        Self { pool }
    }

    /// Close all pooled connections; pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl ConfigStore for PgConfigStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Value>, StoreError>> {
        Box::pin(async move {
            let value = sqlx::query_scalar::<_, Value>("SELECT value FROM config WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
            Ok(value)
        })
    }

    fn server_time(&self) -> BoxFuture<'_, Result<DateTime<Utc>, StoreError>> {
        Box::pin(async move {
            let now = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW() AS now")
                .fetch_one(&self.pool)
                .await?;
            Ok(now)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "postgres");
        assert_eq!(config.password, "postgres");
        assert_eq!(config.database, "metrodb");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.acquire_timeout_secs, DEFAULT_ACQUIRE_TIMEOUT_SECS);
    }

    #[test]
    fn config_builders() {
        let config = StoreConfig::new("db.internal", "metro")
            .with_credentials("api", "secret")
            .with_port(6543)
            .with_max_connections(2)
            .with_acquire_timeout(1);

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.database, "metro");
        assert_eq!(config.user, "api");
        assert_eq!(config.password, "secret");
        assert_eq!(config.port, 6543);
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.acquire_timeout_secs, 1);
    }

    #[test]
    fn connect_options_carry_settings() {
        let opts = StoreConfig::new("db.internal", "metro")
            .with_port(6543)
            .connect_options();

        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_database(), Some("metro"));
    }

    #[tokio::test]
    async fn unreachable_database_is_an_error() {
        // Nothing listens on port 1; the lazy pool fails on first use.
        let config = StoreConfig::new("127.0.0.1", "metrodb")
            .with_port(1)
            .with_acquire_timeout(1);
        let store = PgConfigStore::new(&config);

        assert!(store.server_time().await.is_err());
        assert!(store.get("metro.defaults").await.is_err());
        store.close().await;
    }
}
