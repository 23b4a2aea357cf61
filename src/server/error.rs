//! Mapping of library errors to HTTP responses.
//!
//! Every failure is answered with `{"error": "<message>"}`. Client mistakes
//! get a 400 with a specific message; anything server-side gets a 500 with a
//! fixed per-endpoint message, the detail going to the log only.

use crate::error::ClearCueError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

pub const INVALID_MODE: &str = "Invalid mode specified";
pub const ANALYZE_FAILED: &str = "Failed to analyze. Please try again or contact support.";
pub const REPORT_FAILED: &str = "Failed to generate PDF";

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// An error ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Map a failure of `POST /api/analyze`.
    pub fn analyze(err: ClearCueError) -> Self {
        Self::classify(err, ANALYZE_FAILED)
    }

    /// Map a failure of `POST /api/generate-pdf`.
    pub fn report(err: ClearCueError) -> Self {
        Self::classify(err, REPORT_FAILED)
    }

    fn classify(err: ClearCueError, server_message: &str) -> Self {
        if !err.is_client_error() {
            error!("Request failed: {}", err);
            return Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: server_message.to_string(),
            };
        }
        warn!("Rejected request: {}", err);
        match err {
            ClearCueError::InvalidRequest(detail) => Self::bad_request(detail),
            _ => Self::bad_request(INVALID_MODE),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_mismatch_uses_fixed_message() {
        let api = ApiError::analyze(ClearCueError::ModeMismatch {
            detail: "unknown mode 'x'".into(),
        });
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, INVALID_MODE);
    }

    #[test]
    fn invalid_request_keeps_its_detail() {
        let api = ApiError::report(ClearCueError::InvalidRequest("analysis is required".into()));
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, "analysis is required");
    }

    #[test]
    fn upstream_failure_hides_detail() {
        let api = ApiError::analyze(ClearCueError::UpstreamUnavailable {
            reason: "api key sk-123 rejected".into(),
        });
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, ANALYZE_FAILED);
    }

    #[test]
    fn render_failure_is_report_failure() {
        let api = ApiError::report(ClearCueError::Render {
            detail: "mismatch".into(),
        });
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, REPORT_FAILED);
    }
}
