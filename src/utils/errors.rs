//! Error handling for the SKS portal
//!
//! This module defines the main error type used throughout the application
//! and maps it onto HTTP responses of the form `{"error": "..."}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Main error type for the SKS portal
#[derive(Error, Debug)]
pub enum SksError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Authentication(String),

    #[error("Invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Event not found")]
    EventNotFound { event_id: i64 },

    #[error("Registration not found")]
    RegistrationNotFound { registration_id: String },

    #[error("Route not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

/// Result type alias for portal operations
pub type Result<T> = std::result::Result<T, SksError>;

impl SksError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SksError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SksError::Authentication(_) | SksError::Token(_) => StatusCode::UNAUTHORIZED,
            SksError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            SksError::UserNotFound
            | SksError::EventNotFound { .. }
            | SksError::RegistrationNotFound { .. }
            | SksError::RouteNotFound => StatusCode::NOT_FOUND,
            SksError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SksError::Database(_) => ErrorSeverity::Critical,
            SksError::Migration(_) => ErrorSeverity::Critical,
            SksError::Config(_) => ErrorSeverity::Critical,
            SksError::PermissionDenied(_) => ErrorSeverity::Warning,
            SksError::Authentication(_) | SksError::Token(_) => ErrorSeverity::Warning,
            SksError::InvalidInput(_) => ErrorSeverity::Info,
            SksError::UserNotFound
            | SksError::EventNotFound { .. }
            | SksError::RegistrationNotFound { .. }
            | SksError::RouteNotFound
            | SksError::MethodNotAllowed => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl IntoResponse for SksError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self.severity() {
            ErrorSeverity::Info => tracing::debug!(status = status.as_u16(), error = %message, "Request rejected"),
            ErrorSeverity::Warning => tracing::warn!(status = status.as_u16(), error = %message, "Request rejected"),
            severity => tracing::error!(status = status.as_u16(), %severity, error = %message, "Request failed"),
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for SksError {
    fn from(rejection: JsonRejection) -> Self {
        SksError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for SksError {
    fn from(rejection: QueryRejection) -> Self {
        SksError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for SksError {
    fn from(rejection: PathRejection) -> Self {
        SksError::InvalidInput(rejection.body_text())
    }
}

impl From<config::ConfigError> for SksError {
    fn from(error: config::ConfigError) -> Self {
        SksError::Config(error.to_string())
    }
}
