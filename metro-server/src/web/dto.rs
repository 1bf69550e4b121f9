//! Data transfer objects for web requests and responses.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ClockTime;
use crate::schedule::LastMetro;

/// Query for the next-metro endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NextMetroQuery {
    /// Station name (case-insensitive)
    pub station: Option<String>,

    /// Minutes between trains; defaults to 3
    pub headway: Option<String>,
}

/// Query for the last-metro endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LastMetroQuery {
    /// Station name (case-insensitive)
    pub station: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,

    #[schema(example = "dernier-metro-api")]
    pub service: String,
}

/// Next train at a station while the line is running.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextMetroResponse {
    /// Station as requested
    pub station: String,

    /// Line identifier
    #[schema(example = "M1")]
    pub line: String,

    /// Headway used for the projection
    #[schema(example = 3)]
    pub headway_min: u32,

    /// Projected arrival, HH:MM
    #[schema(value_type = String, example = "15:03")]
    pub next_arrival: ClockTime,

    /// Whether this falls in the last half hour of service
    pub is_last: bool,

    /// Zone the times are expressed in
    #[schema(example = "Europe/Paris")]
    pub tz: String,
}

/// Returned instead of a next train when the line is not running.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceClosedResponse {
    #[schema(example = "closed")]
    pub service: String,

    #[schema(example = "Europe/Paris")]
    pub tz: String,
}

/// Last departure of the day at a station.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastMetroResponse {
    /// Station name as stored in configuration
    #[schema(example = "Chatelet")]
    pub station: String,

    /// Last departure time as stored
    #[schema(example = "00:40")]
    pub last_metro: String,

    #[schema(example = "M1")]
    pub line: String,

    #[schema(example = "Europe/Paris")]
    pub tz: String,
}

impl From<LastMetro> for LastMetroResponse {
    fn from(result: LastMetro) -> Self {
        Self {
            station: result.station,
            last_metro: result.last_metro,
            line: result.defaults.line,
            tz: result.defaults.tz,
        }
    }
}

/// Database time response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DbTimeResponse {
    pub db_time: DateTime<Utc>,
}

/// Database check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DbCheckResponse {
    #[schema(example = "ok")]
    pub status: String,

    pub db_time: DateTime<Utc>,
}

/// Database check failure, with the store's error message.
#[derive(Debug, Serialize, ToSchema)]
pub struct DbCheckFailure {
    #[schema(example = "error")]
    pub status: String,

    pub error: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "missing station")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
