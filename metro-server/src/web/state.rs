//! Application state for the web layer.

use std::sync::Arc;

use chrono_tz::Tz;

use crate::clock::Clock;
use crate::config::DEFAULT_PORT;
use crate::store::ConfigStore;

/// Shared application state.
///
/// Constructed once at startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Configuration store client
    pub store: Arc<dyn ConfigStore>,

    /// Source of the current instant
    pub clock: Arc<dyn Clock>,

    /// Zone in which the wall clock is read
    pub tz: Tz,

    /// Port advertised in the OpenAPI document
    pub port: u16,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: impl ConfigStore + 'static, clock: impl Clock + 'static, tz: Tz) -> Self {
        Self {
            store: Arc::new(store),
            clock: Arc::new(clock),
            tz,
            port: DEFAULT_PORT,
        }
    }

    /// Set the advertised port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
