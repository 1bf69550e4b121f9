//! Request logging middleware.

use std::time::Duration;

use axum::{Router, extract::Request, response::Response};
use tower_http::trace::TraceLayer;
use tracing::{Span, info, info_span};

/// Wrap a router so every completed request logs method, path, status and
/// latency in milliseconds.
pub fn with_request_logging<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request| {
                info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            })
            .on_response(|response: &Response, latency: Duration, _span: &Span| {
                info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis() as u64,
                    "finished"
                );
            }),
    )
}
