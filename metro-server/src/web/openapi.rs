//! OpenAPI document for the HTTP API.

use utoipa::OpenApi;
use utoipa::openapi::server::Server;

use super::dto::*;
use super::routes;

/// Path of the generated document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI description.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dernier Métro API",
        version = "1.0.0",
        description = "Next and last train times for stations of the Paris metro"
    ),
    paths(
        routes::health,
        routes::next_metro,
        routes::last_metro,
        routes::db_test,
        routes::db_check,
    ),
    components(schemas(
        HealthResponse,
        NextMetroResponse,
        ServiceClosedResponse,
        LastMetroResponse,
        DbTimeResponse,
        DbCheckResponse,
        DbCheckFailure,
        ErrorResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "metro", description = "Train times"),
        (name = "database", description = "Configuration store checks"),
    )
)]
pub struct ApiDoc;

/// The generated document, advertising the server at `http://localhost:{port}`.
pub fn api_doc(port: u16) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!("http://localhost:{port}"))]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in ["/health", "/next-metro", "/last-metro", "/db-test", "/db-check"] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn advertises_local_server() {
        let doc = api_doc(8080);
        let servers = doc.servers.unwrap();

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "http://localhost:8080");
    }

    #[test]
    fn serializes_to_json() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("Dernier Métro API"));
        assert!(json.contains("LastMetroResponse"));
    }
}
