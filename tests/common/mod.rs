//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use request_gate::api::HandlerRegistry;
use request_gate::config::parse_config;
use request_gate::lifecycle::startup::build_server;
use request_gate::HttpServer;

/// Route table modelled on a mail-sending service.
pub const EMAIL_CONFIG: &str = r#"
    [responses]
    failure_prefix = "Email failed to be sent"

    [[routes]]
    method = "post"
    endpoint = "/email/send"
    handler = "echo"
    body = { mandatory = ["to", "subject"], optional = ["cc"] }

    [[routes]]
    method = "get"
    endpoint = "/email/history"
    handler = "echo"
    query = { mandatory = ["page"], optional = ["size"] }

    [[routes]]
    method = "get"
    endpoint = "/status"
    handler = "status"

    [[routes]]
    method = "delete"
    endpoint = "/email/{id}"
    handler = "explode"
"#;

/// Build a server from TOML, with the builtins plus any extra handlers.
pub fn server_from_toml(toml: &str, handlers: HandlerRegistry) -> HttpServer {
    let config = parse_config(toml).expect("valid config");
    build_server(config, &handlers).expect("routes resolve")
}

/// Send one request through the router.
#[allow(dead_code)]
pub async fn send(router: Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    router.oneshot(request).await.unwrap()
}

/// Status and parsed JSON body of a response.
#[allow(dead_code)]
pub async fn into_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
