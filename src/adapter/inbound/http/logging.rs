//! Per-request access log.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};
use uuid::Uuid;

/// Response header carrying the generated request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log method, path, status and latency for every request.
///
/// Client and server errors log at warn, everything else at info.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis() as u64;
    if status.is_client_error() || status.is_server_error() {
        warn!(
            %request_id,
            %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            "Request failed"
        );
    } else {
        info!(
            %request_id,
            %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            "Request completed"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
