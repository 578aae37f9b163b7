//! Uniform JSON responses.
//!
//! # Responsibilities
//! - Success: status 200, handler result as the body (no envelope)
//! - Failure: `{"result":"failure","message":…,"httpStatusCode":…}`
//! - Map error kinds to status codes (user → 400, internal → 500)
//!
//! # Design Decisions
//! - Internal messages are logged, never returned
//! - One log line per response, tagged with the request ID

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::{ApiError, ErrorKind};
use crate::config::ResponsesConfig;

/// Identifying details of the request being answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// URL as received, including the query string.
    pub original_url: String,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("unknown")
    }
}

/// Body of every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureBody {
    pub result: String,
    pub message: String,
    pub http_status_code: u16,
}

/// Formats handler outcomes into HTTP responses.
#[derive(Debug, Clone)]
pub struct Responder {
    failure_prefix: String,
    internal_error_message: String,
}

impl Default for Responder {
    fn default() -> Self {
        Self::from_config(&ResponsesConfig::default())
    }
}

impl Responder {
    pub fn from_config(config: &ResponsesConfig) -> Self {
        Self {
            failure_prefix: config.failure_prefix.clone(),
            internal_error_message: config.internal_error_message.clone(),
        }
    }

    /// Answer with status 200 and `result` verbatim.
    pub fn success(&self, result: Value, context: &RequestContext) -> Response {
        tracing::info!(
            request_id = %context.request_id(),
            "API request succeeded - URL: {}",
            context.original_url
        );
        (StatusCode::OK, Json(result)).into_response()
    }

    /// Answer with the failure body for `error`.
    pub fn failure(&self, error: ApiError, context: &RequestContext) -> Response {
        tracing::error!(
            request_id = %context.request_id(),
            url = %context.original_url,
            kind = ?error.kind(),
            "API request failed - {}",
            error.message()
        );
        let (status, body) = self.failure_body(&error);
        (status, Json(body)).into_response()
    }

    /// Status and body for `error`, without logging.
    pub fn failure_body(&self, error: &ApiError) -> (StatusCode, FailureBody) {
        let (status, message) = match error.kind() {
            ErrorKind::UserError => (StatusCode::BAD_REQUEST, error.message()),
            ErrorKind::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.internal_error_message.as_str(),
            ),
        };
        let body = FailureBody {
            result: "failure".to_string(),
            message: format!("{} - {}", self.failure_prefix, message),
            http_status_code: status.as_u16(),
        };
        (status, body)
    }
}

/// Send a success response with the default responder.
pub fn send_success(result: Value, context: &RequestContext) -> Response {
    Responder::default().success(result, context)
}

/// Send a failure response with the default responder.
pub fn send_failure(error: ApiError, context: &RequestContext) -> Response {
    Responder::default().failure(error, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::capture_logs;
    use axum::http::header::CONTENT_TYPE;
    use serde_json::json;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ctx() -> RequestContext {
        RequestContext::new("/email/send?x=1").with_request_id("req-1")
    }

    #[tokio::test]
    async fn test_success_is_unwrapped() {
        let response = send_success(json!({"x": 1}), &ctx());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_json(response).await, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_user_error_is_400_with_message() {
        let response = send_failure(ApiError::user("bad field"), &ctx());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["result"], "failure");
        assert_eq!(body["httpStatusCode"], 400);
        let message = body["message"].as_str().unwrap();
        assert!(message.ends_with("bad field"));
    }

    #[tokio::test]
    async fn test_internal_error_is_500_and_hidden() {
        let response = send_failure(ApiError::internal("db down"), &ctx());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["result"], "failure");
        assert_eq!(body["httpStatusCode"], 500);
        let message = body["message"].as_str().unwrap();
        assert!(!message.contains("db down"));
        assert!(message.contains("Unexpected internal error occurred"));
    }

    #[test]
    fn test_success_logs_one_info_line() {
        let lines = capture_logs(|| {
            send_success(json!({"x": 1}), &ctx());
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("API request succeeded - URL: /email/send?x=1"));
        assert!(lines[0].contains("request_id=req-1"));
    }

    #[test]
    fn test_failure_logs_internal_message() {
        let lines = capture_logs(|| {
            send_failure(ApiError::internal("db down"), &ctx());
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("API request failed - db down"));
        assert!(lines[0].contains("url=/email/send?x=1"));
        assert!(lines[0].contains("kind=InternalError"));
    }

    #[test]
    fn test_configured_messages() {
        let responder = Responder::from_config(&ResponsesConfig {
            failure_prefix: "Email failed to be sent".to_string(),
            internal_error_message: "Try again later".to_string(),
        });

        let (status, body) = responder.failure_body(&ApiError::user("Missing request body"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Email failed to be sent - Missing request body");

        let (status, body) = responder.failure_body(&ApiError::internal("secret"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Email failed to be sent - Try again later");
        assert_eq!(body.http_status_code, 500);
    }

    #[test]
    fn test_failure_body_field_names() {
        let (_, body) = Responder::default().failure_body(&ApiError::user("x"));
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(
            value,
            json!({
                "result": "failure",
                "message": "Request failed - x",
                "httpStatusCode": 400
            })
        );
    }
}
