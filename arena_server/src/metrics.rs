//! Prometheus metrics for the arena server.
//!
//! Metrics are recorded through the `metrics` facade. Until an exporter is
//! installed with [`init_metrics`], recording is a no-op.
//!
//! # Metrics Categories
//!
//! - **HTTP Metrics**: Request counts and duration by route and status
//! - **Domain Metrics**: Registrations, match results, walkovers, penalties,
//!   bans and matchmaking activity
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use arena_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_requests_total("POST", "/api/v1/players", 201);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
///
/// # Arguments
///
/// - `addr`: Address to bind the metrics server to (e.g., `0.0.0.0:9090`)
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

/// Record a domain error returned to a client.
pub fn domain_errors_total(kind: &str) {
    metrics::counter!("domain_errors_total", "kind" => kind.to_string()).increment(1);
}

// ============================================================================
// Domain Metrics
// ============================================================================

/// Increment registrations counter for an entity type.
pub fn registrations_total(entity: &'static str) {
    metrics::counter!("registrations_total", "entity" => entity).increment(1);
}

/// Increment finished matches counter.
pub fn matches_finished_total(draw: bool) {
    metrics::counter!("matches_finished_total",
        "draw" => draw.to_string()
    )
    .increment(1);
}

/// Increment walkovers counter.
pub fn walkovers_total() {
    metrics::counter!("walkovers_total").increment(1);
}

/// Increment penalties counter.
pub fn penalties_issued_total(kind: &str) {
    metrics::counter!("penalties_issued_total", "kind" => kind.to_string()).increment(1);
}

/// Increment bans counter.
pub fn player_bans_total() {
    metrics::counter!("player_bans_total").increment(1);
}

/// Record matches created by one matchmaking pass.
pub fn matchmaking_pairs_total(pairs: usize) {
    metrics::counter!("matchmaking_pairs_total").increment(pairs as u64);
}

/// Set current matchmaking queue length.
pub fn matchmaking_queue_length(length: usize) {
    metrics::gauge!("matchmaking_queue_length").set(length as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter_is_noop() {
        http_requests_total("GET", "/health", 200);
        http_request_duration_ms("GET", "/health", 0.4);
        domain_errors_total("conflict");
        registrations_total("player");
        matches_finished_total(true);
        walkovers_total();
        penalties_issued_total("LATE");
        player_bans_total();
        matchmaking_pairs_total(3);
        matchmaking_queue_length(0);
    }
}
