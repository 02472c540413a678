use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use polyglot_core::Error;
use serde::Serialize;

/// JSON error body returned by handlers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub kind: &'static str,
    pub message: String,
}

/// Engine error turned into an HTTP response.
///
/// Validation maps to 400, conflicts to 409, consistency violations and
/// loader failures to 500.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            Error::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            Error::Consistency(_) => (StatusCode::INTERNAL_SERVER_ERROR, "consistency"),
            Error::Seed(_) | Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        }
        let body = ErrorBody {
            code: status.as_u16(),
            kind,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
