//! Logging middleware
//!
//! Logs every HTTP request with its status and latency inside a span that
//! carries a generated request ID.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Log method, path, status and latency of each request
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = info_span!("request", %request_id, %method, %path);

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    span.in_scope(|| {
        if response.status().is_server_error() {
            warn!(status, latency_ms, "Request completed with server error");
        } else {
            info!(status, latency_ms, "Request completed");
        }
    });

    response
}
