//! Server configuration from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::store::StoreConfig;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default zone for reading the wall clock.
const DEFAULT_TZ: Tz = chrono_tz::Europe::Paris;

/// Errors in the process environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable that must be numeric is not
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// Unknown IANA zone name
    #[error("unknown time zone: {0}")]
    InvalidTimeZone(String),
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port on all interfaces
    pub port: u16,

    /// Zone in which the next-metro endpoint reads the wall clock
    pub tz: Tz,

    /// Configuration database settings
    pub store: StoreConfig,

    /// Serve config rows from this JSON file instead of the database
    pub config_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let tz = match get("METRO_TZ") {
            Some(name) => Tz::from_str(name.trim()).map_err(|_| ConfigError::InvalidTimeZone(name))?,
            None => DEFAULT_TZ,
        };

        let defaults = StoreConfig::default();
        let store = StoreConfig::new(
            get("PGHOST").unwrap_or(defaults.host),
            get("PGDATABASE").unwrap_or(defaults.database),
        )
        .with_credentials(
            get("PGUSER").unwrap_or(defaults.user),
            get("PGPASSWORD").unwrap_or(defaults.password),
        )
        .with_port(parse_or(get("PGPORT"), "PGPORT", defaults.port)?);

        Ok(Self {
            port,
            tz,
            store,
            config_file: get("METRO_CONFIG_FILE").map(PathBuf::from),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            tz: DEFAULT_TZ,
            store: StoreConfig::default(),
            config_file: None,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: v }),
        None => Ok(default),
    }
}
