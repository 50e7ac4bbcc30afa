//! API error handling.
//!
//! Maps workflow errors onto status codes and the failure envelope.

use axum::{
    Json,
    extract::rejection::{BytesRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::dto::ApiResponse;
use crate::application::WishError;

// =============================================================================
// API Error Response
// =============================================================================

/// Status code plus the `error` and optional `message` of the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    /// Short, stable description.
    pub error: String,
    /// Detail for the caller, omitted when there is nothing to add.
    pub message: Option<String>,
}

impl ApiErrorResponse {
    #[must_use]
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message,
        }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, Some(message.into()))
    }

    /// Creates a 405 Method Not Allowed response.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            Some(message.into()),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::failure(self.error, self.message);
        (self.status, Json(body)).into_response()
    }
}

impl From<WishError> for ApiErrorResponse {
    fn from(error: WishError) -> Self {
        match &error {
            WishError::MissingField(field) => Self::bad_request(
                "Missing required field",
                format!("{} is required", field.name()),
            ),
            WishError::FieldTooLong { .. } => {
                Self::new(StatusCode::BAD_REQUEST, error.to_string(), None)
            }
            WishError::InvalidArgument(detail) => {
                Self::bad_request("Invalid argument", detail.clone())
            }
            WishError::QuotaExceeded { .. } => {
                Self::new(StatusCode::FORBIDDEN, error.to_string(), None)
            }
            // Already logged where the store call failed.
            WishError::StoreUnavailable(source) => Self::internal_error(source.to_string()),
        }
    }
}

/// A query string the extractor could not deserialize, such as a
/// repeated `limit`.
impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            rejection.status(),
            "Invalid argument",
            Some(rejection.body_text()),
        )
    }
}

/// A body that could not be buffered. Keeps the rejection's status, so an
/// oversized body stays a 413.
impl From<BytesRejection> for ApiErrorResponse {
    fn from(rejection: BytesRejection) -> Self {
        Self::new(
            rejection.status(),
            "Invalid request body",
            Some(rejection.body_text()),
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::WishField;
    use crate::infrastructure::RepositoryError;
    use rstest::rstest;

    #[rstest]
    #[case(WishError::MissingField(WishField::Gender), StatusCode::BAD_REQUEST)]
    #[case(
        WishError::FieldTooLong { field: WishField::Nickname, max: 20 },
        StatusCode::BAD_REQUEST
    )]
    #[case(WishError::InvalidArgument("bad".to_string()), StatusCode::BAD_REQUEST)]
    #[case(WishError::QuotaExceeded { limit: 3 }, StatusCode::FORBIDDEN)]
    #[case(
        WishError::StoreUnavailable(RepositoryError::DatabaseError("down".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn test_status_mapping(#[case] error: WishError, #[case] expected: StatusCode) {
        assert_eq!(ApiErrorResponse::from(error).status, expected);
    }

    #[rstest]
    fn test_missing_field_message_names_field() {
        let response = ApiErrorResponse::from(WishError::MissingField(WishField::Content));
        assert_eq!(response.error, "Missing required field");
        assert_eq!(response.message.as_deref(), Some("content is required"));
    }

    #[rstest]
    fn test_field_too_long_error_text() {
        let response = ApiErrorResponse::from(WishError::FieldTooLong {
            field: WishField::Contact,
            max: 100,
        });
        assert_eq!(response.error, "Contact must not exceed 100 characters");
        assert!(response.message.is_none());
    }

    #[rstest]
    fn test_quota_error_text() {
        let response = ApiErrorResponse::from(WishError::QuotaExceeded { limit: 3 });
        assert_eq!(response.error, "Wish limit of 3 reached");
    }

    #[rstest]
    fn test_store_error_carries_underlying_text() {
        let response = ApiErrorResponse::from(WishError::StoreUnavailable(
            RepositoryError::DatabaseError("connection refused".to_string()),
        ));
        assert_eq!(response.error, "Internal server error");
        assert_eq!(
            response.message.as_deref(),
            Some("Database error: connection refused")
        );
    }

    #[rstest]
    fn test_method_not_allowed() {
        let response = ApiErrorResponse::method_not_allowed();
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.error, "Method not allowed");
    }
}
