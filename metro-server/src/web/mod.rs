//! Web layer for the metro API.
//!
//! Provides the JSON endpoints, request logging and the generated
//! OpenAPI documentation.

mod dto;
mod logging;
mod openapi;
mod routes;
mod state;
mod templates;

pub use dto::*;
pub use openapi::{ApiDoc, OPENAPI_JSON_PATH, api_doc};
pub use routes::{AppError, SERVICE_NAME, create_router};
pub use state::AppState;
