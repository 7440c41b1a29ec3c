//! Error types for adstxt-crawler
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (fetch, parse, storage, config)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for adstxt-crawler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for adstxt-crawler
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "sites_file")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Per-site ads.txt fetch failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Run or seller record not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid caller-supplied parameters (e.g. from > to on a stats query)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Shutdown in progress
    #[error("shutdown in progress")]
    ShuttingDown,

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Record not found
    #[error("record not found: {0}")]
    NotFound(String),
}

/// A per-site ads.txt fetch failure
///
/// Covers both transport-level failures (DNS, TLS, refused connection,
/// timeout) and non-2xx HTTP responses. These are isolated to one site and
/// never abort the owning run.
#[derive(Debug, Error)]
#[error("failed to fetch ads.txt for {site}: {kind}")]
pub struct FetchError {
    /// The publisher domain that failed
    pub site: String,
    /// What went wrong
    pub kind: FetchErrorKind,
}

/// Classification of fetch failures
#[derive(Debug, Error)]
pub enum FetchErrorKind {
    /// The constructed ads.txt URL was not valid
    #[error("invalid URL {0}")]
    InvalidUrl(String),

    /// Server answered with a non-2xx status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// DNS, TLS, connection or other transport failure
    #[error("transport error: {0}")]
    Transport(String),
}

/// Structured error response for API endpoints
///
/// Provides machine-readable error codes alongside human-readable messages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Error detail information in an [`ApiError`]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "not_found", "invalid_request")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Trait for converting errors to HTTP status codes
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - client error (invalid input)
            Error::Config { .. } => 400,
            Error::InvalidRequest(_) => 400,

            // 404 Not Found
            Error::NotFound(_) => 404,
            Error::Database(DatabaseError::NotFound(_)) => 404,

            // 502 Bad Gateway - upstream site failures
            Error::Fetch(_) => 502,

            // 503 Service Unavailable
            Error::ShuttingDown => 503,

            // 500 Internal Server Error - server-side issues
            Error::Database(_) => 500,
            Error::Sqlx(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::NotFound(_) => "not_found",
            Error::Database(DatabaseError::NotFound(_)) => "not_found",
            Error::Database(_) => "database_error",
            Error::Sqlx(_) => "database_error",
            Error::Fetch(_) => "fetch_error",
            Error::ShuttingDown => "shutting_down",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::Fetch(FetchError { site, kind }) => Some(serde_json::json!({
                "site": site,
                "kind": kind.to_string(),
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}

impl From<reqwest::Error> for FetchErrorKind {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchErrorKind::Timeout
        } else if let Some(status) = e.status() {
            FetchErrorKind::HttpStatus(status.as_u16())
        } else {
            FetchErrorKind::Transport(e.to_string())
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = Error::NotFound("run xyz".to_string());
        assert_eq!(error.status_code(), 404);
        assert_eq!(error.error_code(), "not_found");
    }

    #[test]
    fn test_invalid_request_maps_to_400() {
        let error = Error::InvalidRequest("from must be <= to".to_string());
        assert_eq!(error.status_code(), 400);
        assert_eq!(error.error_code(), "invalid_request");
    }

    #[test]
    fn test_fetch_error_maps_to_502_with_details() {
        let error = Error::Fetch(FetchError {
            site: "example.com".to_string(),
            kind: FetchErrorKind::HttpStatus(404),
        });
        assert_eq!(error.status_code(), 502);

        let api_error: ApiError = error.into();
        assert_eq!(api_error.error.code, "fetch_error");
        let details = api_error.error.details.unwrap();
        assert_eq!(details["site"], "example.com");
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let error = Error::Database(DatabaseError::QueryFailed("boom".to_string()));
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.error_code(), "database_error");
    }

    #[test]
    fn test_fetch_error_display_includes_site() {
        let error = FetchError {
            site: "pub.example".to_string(),
            kind: FetchErrorKind::Timeout,
        };
        let message = error.to_string();
        assert!(message.contains("pub.example"));
        assert!(message.contains("timed out"));
    }
}
