//! Request ID middleware for tracing and debugging.
//!
//! Every request gets an id, taken from the `x-request-id` header or freshly
//! generated, that is logged on start and completion and echoed back.

use super::errors::Rejection;
use crate::{logging, metrics};
use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generate or extract request ID from headers
fn get_or_generate_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Middleware to add request ID to all requests and responses
///
/// Also records the request count and duration metrics, labelled with the
/// matched route rather than the raw path, and logs domain rejections under
/// the request's id.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = get_or_generate_request_id(request.headers());

    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %request.uri(),
        "Request started"
    );

    let started = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = started.elapsed();

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    let status = response.status().as_u16();
    if let Some(rejection) = response.extensions().get::<Rejection>() {
        logging::log_rejection(
            &request_id,
            &rejection.kind.to_string(),
            status,
            &rejection.message,
        );
    }
    metrics::http_requests_total(&method, &route, status);
    metrics::http_request_duration_ms(&method, &route, elapsed.as_secs_f64() * 1000.0);
    logging::log_api_request(
        &request_id,
        &method,
        &route,
        status,
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_generate_request_id_with_existing() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("test-id-123"));

        assert_eq!(get_or_generate_request_id(&headers), "test-id-123");
    }

    #[test]
    fn test_get_or_generate_request_id_generates_new() {
        let request_id = get_or_generate_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&request_id).is_ok());
    }

    #[test]
    fn test_empty_header_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(""));
        assert!(Uuid::parse_str(&get_or_generate_request_id(&headers)).is_ok());
    }
}
