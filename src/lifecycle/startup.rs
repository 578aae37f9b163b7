//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Resolve configured routes against the handler registry
//! - Register routes before the listener starts
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use std::path::Path;

use crate::api::handler::HandlerRegistry;
use crate::api::registry::declarations_from_config;
use crate::config::{load_config, ConfigError, GatewayConfig};
use crate::http::HttpServer;

/// Load configuration from `path`, or use defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GatewayConfig::default()),
    }
}

/// Resolve the configured routes and build the server.
pub fn build_server(config: GatewayConfig, handlers: &HandlerRegistry) -> Result<HttpServer, ConfigError> {
    let routes = declarations_from_config(&config.routes, handlers)?;
    if routes.is_empty() {
        tracing::warn!("No routes configured");
    }
    Ok(HttpServer::new(config, &routes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_load_defaults_without_path() {
        let config = load(None).unwrap();
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_unknown_handler_is_fatal() {
        let config = parse_config(
            r#"
            [[routes]]
            method = "get"
            endpoint = "/x"
            handler = "missing"
            "#,
        )
        .unwrap();

        let err = build_server(config, &HandlerRegistry::with_builtins()).err().unwrap();
        assert_eq!(err.to_string(), "Unknown handler 'missing' for route /x");
    }
}
