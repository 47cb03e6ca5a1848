//! Error handling for the FloodWatch alert service
//!
//! Every request-scoped failure becomes a JSON error body with a non-2xx
//! status. Per-location and per-recipient failures never reach this type;
//! they are folded into the pass or broadcast results instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ValidationError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    // External service errors
    #[error("Weather service error: {0}")]
    WeatherService(String),

    #[error("Email delivery error: {0}")]
    EmailDelivery(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation {
            field: err.field.to_string(),
            message: err.message,
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                field: None,
            },
        }
    }
}

impl AppError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::UnknownLocation(_) => (StatusCode::NOT_FOUND, "UNKNOWN_LOCATION"),
            AppError::WeatherService(_) => (StatusCode::BAD_GATEWAY, "WEATHER_SERVICE_ERROR"),
            AppError::EmailDelivery(_) => (StatusCode::BAD_GATEWAY, "EMAIL_DELIVERY_ERROR"),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let (message, field) = match &self {
            AppError::Validation { field, message } => (message.clone(), Some(field.clone())),
            // Driver details stay in the log
            AppError::DatabaseError(_) => ("A database error occurred".to_string(), None),
            other => (other.to_string(), None),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        let mut body = ErrorResponse::new(code, message);
        body.error.field = field;

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: AppError = ValidationError::new("email", "Invalid email format").into();
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"));
        assert_eq!(err.to_string(), "Validation error: Invalid email format");
    }

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        assert_eq!(
            AppError::WeatherService("timeout".into()).status_and_code().0,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::EmailDelivery("bounced".into()).status_and_code().0,
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = AppError::DatabaseError(sqlx::Error::RowNotFound);
        assert_eq!(err.status_and_code().1, "DATABASE_ERROR");
    }

    #[test]
    fn test_every_variant_has_a_status_and_code() {
        let cases = [
            (
                AppError::Validation {
                    field: "email".into(),
                    message: "bad".into(),
                },
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AppError::UnknownLocation("Atlantis".into()), StatusCode::NOT_FOUND, "UNKNOWN_LOCATION"),
            (AppError::WeatherService("x".into()), StatusCode::BAD_GATEWAY, "WEATHER_SERVICE_ERROR"),
            (AppError::EmailDelivery("x".into()), StatusCode::BAD_GATEWAY, "EMAIL_DELIVERY_ERROR"),
            (
                AppError::Configuration("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
            ),
            (
                AppError::DatabaseError(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{:?}", err);
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Unauthorized("missing token".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
