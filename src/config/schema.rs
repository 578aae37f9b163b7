//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::api::validation::FieldSchema;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Failure response wording.
    pub responses: ResponsesConfig,

    /// Declared routes, registered in order.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Largest request body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Wording of failure responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponsesConfig {
    /// Prepended to every failure message: "<prefix> - <message>".
    pub failure_prefix: String,

    /// Returned in place of internal error messages.
    pub internal_error_message: String,
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            failure_prefix: "Request failed".to_string(),
            internal_error_message: "Unexpected internal error occurred".to_string(),
        }
    }
}

/// A declared route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// HTTP method (get, post, put, delete).
    pub method: String,

    /// Path pattern, e.g. "/email/send".
    pub endpoint: String,

    /// Name of a registered handler.
    pub handler: String,

    /// Body field rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FieldSchema>,

    /// Query field rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<FieldSchema>,
}
