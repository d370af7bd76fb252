//! Structured logging configuration.
//!
//! Core crate records arrive through the `log` facade and are bridged into
//! `tracing`, so one subscriber formats everything.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels come from `RUST_LOG`, defaulting to `info`.
///
/// # Example
///
/// ```no_run
/// use arena_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a completed API request
///
/// Requests slower than a second are logged as warnings.
pub fn log_api_request(
    request_id: &str,
    method: &str,
    path: &str,
    status_code: u16,
    duration_ms: u64,
) {
    if duration_ms > 1000 {
        tracing::warn!(
            request_id = request_id,
            http_method = method,
            http_path = path,
            http_status = status_code,
            duration_ms = duration_ms,
            "Slow API request"
        );
    } else {
        tracing::info!(
            request_id = request_id,
            http_method = method,
            http_path = path,
            http_status = status_code,
            duration_ms = duration_ms,
            "API request completed"
        );
    }
}

/// Log a request rejected by a domain rule
pub fn log_rejection(request_id: &str, kind: &str, status_code: u16, message: &str) {
    if status_code == 403 {
        tracing::warn!(
            request_id = request_id,
            error_kind = kind,
            http_status = status_code,
            "{}",
            message
        );
    } else {
        tracing::debug!(
            request_id = request_id,
            error_kind = kind,
            http_status = status_code,
            "{}",
            message
        );
    }
}
