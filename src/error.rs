//! Error types for the signal service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    /// The lunar calendar collaborator could not resolve a solar date
    #[error("Invalid calendar input for {date}: {reason}")]
    InvalidCalendarInput { date: NaiveDate, reason: String },

    /// Index arithmetic produced a position outside the six-state cycle
    #[error("Invalid six-god state index: {0}")]
    InvalidState(usize),

    #[error("Lunar calendar unavailable: {0}")]
    CalendarUnavailable(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl SignalError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCalendarInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidState(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CalendarUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for SignalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "signal request failed");
        } else {
            tracing::warn!(error = %self, "signal request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for signal operations
pub type Result<T> = std::result::Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let date = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap();
        let err = SignalError::InvalidCalendarInput {
            date,
            reason: "out of range".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.to_string(),
            "Invalid calendar input for 1800-01-01: out of range"
        );

        assert_eq!(
            SignalError::InvalidState(6).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SignalError::CalendarUnavailable("probe".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            SignalError::InvalidTimestamp("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
