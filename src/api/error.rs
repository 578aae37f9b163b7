//! Classified API errors.
//!
//! Every failure that reaches the responder carries one of two kinds:
//! - `UserError`: the caller sent a malformed request (answered with 400)
//! - `InternalError`: anything else (answered with 500, message withheld)

use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Kind of a classified error, used only to pick the status and exposure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request itself is invalid.
    UserError,
    /// Failure inside the service.
    InternalError,
}

/// An error tagged with the side that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    kind: ErrorKind,
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Error caused by the caller's request.
    pub fn user(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::UserError)
    }

    /// Error caused by the service.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::InternalError)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_user_error(&self) -> bool {
        self.kind == ErrorKind::UserError
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(format!("IO error: {}", err))
    }
}

/// Lets handlers outside the registrar return `ApiError` directly.
/// The request URL is not known here, so the failure is formatted with defaults.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        crate::api::response::Responder::default().failure(self, &Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        let err = ApiError::user("bad field");
        assert_eq!(err.kind(), ErrorKind::UserError);
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "bad field");

        let err = ApiError::internal("db down");
        assert_eq!(err.kind(), ErrorKind::InternalError);
        assert!(!err.is_user_error());
        assert_eq!(err.message(), "db down");
    }

    #[test]
    fn test_conversions_are_internal() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ApiError::from(json_err).kind(), ErrorKind::InternalError);

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = ApiError::from(io_err);
        assert_eq!(err.kind(), ErrorKind::InternalError);
        assert!(err.message().contains("disk"));
    }
}
