//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::{debug, error};

use crate::domain::{
    ClockTime, Headway, InvalidHeadway, MissingStation, StationName, classify, next_arrival,
};
use crate::schedule::{self, LookupError};

use super::dto::*;
use super::logging::with_request_logging;
use super::openapi::{OPENAPI_JSON_PATH, api_doc};
use super::state::AppState;
use super::templates::ApiDocsTemplate;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "dernier-metro-api";

/// The simulated line.
const LINE: &str = "M1";

/// Create the application router.
///
/// Unknown paths and unsupported methods on known paths both answer with
/// the JSON 404.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/next-metro", get(next_metro).fallback(not_found))
        .route("/last-metro", get(last_metro).fallback(not_found))
        .route("/db-test", get(db_test).fallback(not_found))
        .route("/db-check", get(db_check).fallback(not_found))
        .route("/api-docs", get(api_docs_page).fallback(not_found))
        .route(OPENAPI_JSON_PATH, get(openapi_json).fallback(not_found))
        .fallback(not_found);

    with_request_logging(router).with_state(state)
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// Next train at a station, projected from the headway.
///
/// Outside the service window the line reports itself closed instead.
#[utoipa::path(
    get,
    path = "/next-metro",
    params(NextMetroQuery),
    responses(
        (status = 200, description = "Next arrival, or `{service: \"closed\"}` outside service hours", body = NextMetroResponse),
        (status = 400, description = "Missing station, invalid headway or malformed query", body = ErrorResponse)
    ),
    tag = "metro"
)]
pub async fn next_metro(
    State(state): State<AppState>,
    query: Result<Query<NextMetroQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let station = StationName::parse_optional(req.station.as_deref())?;
    let headway = match req.headway.as_deref().map(str::trim) {
        Some(h) if !h.is_empty() => Headway::parse(h)?,
        _ => Headway::default(),
    };

    let now = state.clock.now().with_timezone(&state.tz);
    let status = classify(ClockTime::from_time(now.time()));
    let tz = state.tz.name().to_string();

    if !status.in_service {
        debug!(%station, "line closed");
        return Ok(Json(ServiceClosedResponse {
            service: "closed".to_string(),
            tz,
        })
        .into_response());
    }

    Ok(Json(NextMetroResponse {
        station: station.to_string(),
        line: LINE.to_string(),
        headway_min: headway.minutes(),
        next_arrival: next_arrival(now.time(), headway),
        is_last: status.is_last,
        tz,
    })
    .into_response())
}

/// Last train of the day at a station.
#[utoipa::path(
    get,
    path = "/last-metro",
    params(LastMetroQuery),
    responses(
        (status = 200, description = "Last departure", body = LastMetroResponse),
        (status = 400, description = "Missing station or malformed query", body = ErrorResponse),
        (status = 404, description = "Station not found", body = ErrorResponse),
        (status = 500, description = "Configuration missing or store failure", body = ErrorResponse)
    ),
    tag = "metro"
)]
pub async fn last_metro(
    State(state): State<AppState>,
    query: Result<Query<LastMetroQuery>, QueryRejection>,
) -> Result<Json<LastMetroResponse>, AppError> {
    let Query(req) = query?;
    let station = StationName::parse_optional(req.station.as_deref())?;
    let result = schedule::last_metro(state.store.as_ref(), &station).await?;
    Ok(Json(result.into()))
}

/// Database time check.
#[utoipa::path(
    get,
    path = "/db-test",
    responses(
        (status = 200, description = "Database reachable", body = DbTimeResponse),
        (status = 500, description = "Database unreachable", body = ErrorResponse)
    ),
    tag = "database"
)]
pub async fn db_test(State(state): State<AppState>) -> Response {
    match state.store.server_time().await {
        Ok(db_time) => Json(DbTimeResponse { db_time }).into_response(),
        Err(e) => {
            error!(error = %e, "db-test failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("db connection failed")),
            )
                .into_response()
        }
    }
}

/// Database check with the failure reason.
#[utoipa::path(
    get,
    path = "/db-check",
    responses(
        (status = 200, description = "Database reachable", body = DbCheckResponse),
        (status = 500, description = "Database unreachable", body = DbCheckFailure)
    ),
    tag = "database"
)]
pub async fn db_check(State(state): State<AppState>) -> Response {
    match state.store.server_time().await {
        Ok(db_time) => Json(DbCheckResponse {
            status: "ok".to_string(),
            db_time,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "db-check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DbCheckFailure {
                    status: "error".to_string(),
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Swagger UI page.
async fn api_docs_page() -> Result<Html<String>, AppError> {
    let template = ApiDocsTemplate {
        title: "Dernier Métro API".to_string(),
        spec_url: OPENAPI_JSON_PATH.to_string(),
    };
    let html = template.render().map_err(|e| {
        error!(error = %e, "template error");
        AppError::Internal {
            message: "internal server error".to_string(),
        }
    })?;
    Ok(Html(html))
}

/// Generated OpenAPI document.
async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc(state.port))
}

/// Fallback for unmatched routes.
async fn not_found() -> AppError {
    AppError::NotFound {
        message: "not found".to_string(),
    }
}

/// Application error type.
///
/// The message is sent to the client as-is, so internal failures carry a
/// generic message and are logged with detail where they are converted.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<MissingStation> for AppError {
    fn from(e: MissingStation) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InvalidHeadway> for AppError {
    fn from(e: InvalidHeadway) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        debug!(error = %e, "rejected query string");
        AppError::BadRequest {
            message: "invalid query string".to_string(),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::StationNotFound => AppError::NotFound {
                message: e.to_string(),
            },
            LookupError::MissingDefaults | LookupError::MissingLastMetros => {
                error!(error = %e, "configuration store is missing a required row");
                AppError::Internal {
                    message: e.to_string(),
                }
            }
            LookupError::MalformedConfig { .. } | LookupError::Store(_) => {
                error!(error = %e, "last-metro lookup failed");
                AppError::Internal {
                    message: "internal server error".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        debug!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
