//! End-to-end checks through the fully layered router.

use axum::http::StatusCode;
use serde_json::json;

use request_gate::api::{handler_fn, ApiError, HandlerRegistry};

mod common;

fn handlers() -> HandlerRegistry {
    let mut handlers = HandlerRegistry::with_builtins();
    handlers.insert(
        "explode",
        handler_fn(|_req| async { Err(ApiError::internal("connection to smtp relay refused")) }),
    );
    handlers
}

#[tokio::test]
async fn test_valid_body_is_echoed() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());
    let response = common::send(
        server.router(),
        "POST",
        "/email/send",
        Some(r#"{"to": "a@example.com", "subject": "hi", "cc": "b@example.com"}"#),
    )
    .await;

    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "body": {"to": "a@example.com", "subject": "hi", "cc": "b@example.com"},
            "query": null
        })
    );
}

#[tokio::test]
async fn test_missing_mandatory_field() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());
    let response = common::send(
        server.router(),
        "POST",
        "/email/send",
        Some(r#"{"to": "a@example.com"}"#),
    )
    .await;

    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "result": "failure",
            "message": "Email failed to be sent - Missing mandatory field in request body: subject",
            "httpStatusCode": 400
        })
    );
}

#[tokio::test]
async fn test_unrecognized_field() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());
    let response = common::send(
        server.router(),
        "POST",
        "/email/send",
        Some(r#"{"to": "a", "subject": "b", "attachments": []}"#),
    )
    .await;

    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Email failed to be sent - Unrecognized field in request body: attachments"
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());
    let response = common::send(server.router(), "POST", "/email/send", Some("[1, 2, 3]")).await;

    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email failed to be sent - Malformed request body");
}

#[tokio::test]
async fn test_query_schema() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());

    let response = common::send(server.router(), "GET", "/email/history", None).await;
    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email failed to be sent - Missing request query");

    let response = common::send(server.router(), "GET", "/email/history?size=5", None).await;
    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Email failed to be sent - Missing mandatory field in request query: page"
    );

    let response = common::send(server.router(), "GET", "/email/history?page=2&size=5", None).await;
    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], json!({"page": "2", "size": "5"}));
}

#[tokio::test]
async fn test_internal_error_not_leaked() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());
    let response = common::send(server.router(), "DELETE", "/email/42", None).await;

    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["result"], "failure");
    assert_eq!(body["httpStatusCode"], 500);
    assert_eq!(
        body["message"],
        "Email failed to be sent - Unexpected internal error occurred"
    );
}

#[tokio::test]
async fn test_status_route() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());
    let response = common::send(server.router(), "GET", "/status", None).await;

    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());

    let response = common::send(server.router(), "GET", "/status", None).await;
    let generated = response.headers()["x-request-id"].to_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&generated).is_ok());

    let request = axum::http::Request::builder()
        .uri("/status")
        .header("x-request-id", "client-supplied")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(server.router(), request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "client-supplied");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = common::server_from_toml(common::EMAIL_CONFIG, handlers());
    let response = common::send(server.router(), "GET", "/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
