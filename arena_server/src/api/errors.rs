//! Mapping of core errors onto HTTP responses.

use crate::metrics;
use arena::{ArenaError, ErrorKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

/// Rejection details attached to error responses for the access log
#[derive(Debug, Clone)]
pub struct Rejection {
    pub kind: ErrorKind,
    pub message: String,
}

/// A core error on its way to the client
#[derive(Debug)]
pub struct ApiError(pub ArenaError);

impl From<ArenaError> for ApiError {
    fn from(err: ArenaError) -> Self {
        Self(err)
    }
}

/// HTTP status for a core error
pub fn status_for(err: &ArenaError) -> StatusCode {
    match err.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict | ErrorKind::StateConflict => StatusCode::CONFLICT,
        ErrorKind::BusinessRule if err.is_player_restriction() => StatusCode::FORBIDDEN,
        ErrorKind::BusinessRule => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Escalation => StatusCode::FORBIDDEN,
    }
}

/// Whether this error reports a player who was just banned
fn is_new_ban(err: &ArenaError) -> bool {
    matches!(
        err,
        ArenaError::MaxPenaltiesReached {
            newly_banned: true,
            ..
        }
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let kind = self.0.kind();
        let error = self.0.client_message();

        if is_new_ban(&self.0) {
            metrics::player_bans_total();
        }
        metrics::domain_errors_total(&kind.to_string());

        let rejection = Rejection {
            kind,
            message: error.clone(),
        };
        let mut response = (status, Json(ErrorResponse { error, kind })).into_response();
        response.extensions_mut().insert(rejection);
        response
    }
}

/// Handler result
pub type ApiResult<T> = Result<T, ApiError>;
