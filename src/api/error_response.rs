//! HTTP error response handling for the API
//!
//! Converts domain errors to HTTP responses with appropriate status codes
//! and JSON error bodies.

use crate::error::{ApiError, Error, ToHttpStatus};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Convert domain errors to HTTP responses automatically
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let api_error: ApiError = self.into();

        (status_code, Json(api_error)).into_response()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use crate::error::{ApiError, Error, FetchError, FetchErrorKind};

    #[test]
    fn test_not_found_response_body() {
        let error = Error::NotFound("No sellers found".to_string());
        let api_error: ApiError = error.into();
        assert_eq!(api_error.error.code, "not_found");
        assert!(api_error.error.message.contains("No sellers found"));
    }

    #[test]
    fn test_fetch_error_carries_site_details() {
        let error = Error::Fetch(FetchError {
            site: "example.com".to_string(),
            kind: FetchErrorKind::Timeout,
        });
        let api_error: ApiError = error.into();
        let details = api_error.error.details.unwrap();
        assert_eq!(details["site"], "example.com");
    }
}
