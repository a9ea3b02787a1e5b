//! HTTP error envelope and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns: [`DomainError`] values are
//! translated into the wire envelope `{"error": true, "message": ...}` and a
//! status code here, nowhere else.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

use crate::domain::{DomainError, ErrorCode};

/// Wire envelope for every error response.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ApiErrorBody {
    /// Always `true`; lets clients branch on a single field.
    pub error: bool,
    /// Human-readable failure description.
    pub message: String,
}

/// HTTP-facing error carrying the domain failure it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(DomainError);

impl ApiError {
    /// The underlying domain failure.
    pub fn domain(&self) -> &DomainError {
        &self.0
    }

    fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        // Internal messages may carry store details; redact them on the wire.
        let message = if self.0.code() == ErrorCode::InternalError {
            error!(error = %self.0, "internal error surfaced to client");
            "internal server error".to_owned()
        } else {
            self.0.message().to_owned()
        };
        HttpResponse::build(self.status()).json(ApiErrorBody {
            error: true,
            message,
        })
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::unauthorized(), StatusCode::UNAUTHORIZED)]
    #[case(DomainError::forbidden(), StatusCode::FORBIDDEN)]
    #[case(DomainError::not_found("x"), StatusCode::NOT_FOUND)]
    #[case(DomainError::conflict("x"), StatusCode::CONFLICT)]
    #[case(DomainError::invalid_request("x"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_mapping(#[case] error: DomainError, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(error).status_code(), expected);
    }

    #[test]
    fn internal_messages_are_redacted() {
        let response = ApiError::from(DomainError::internal("connection string leaked"))
            .error_response();
        let body = actix_web::body::to_bytes(response.into_body());
        let bytes = futures::executor::block_on(body).expect("body readable");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(
            value.get("message").and_then(serde_json::Value::as_str),
            Some("internal server error")
        );
        assert_eq!(
            value.get("error").and_then(serde_json::Value::as_bool),
            Some(true)
        );
    }
}
