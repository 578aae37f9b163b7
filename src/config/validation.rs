//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject route methods the registrar cannot bind
//! - Reject endpoints the router cannot bind (syntax, capture conflicts)
//! - Detect duplicate (method, endpoint) pairs
//! - Reject fields declared both mandatory and optional
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;

use thiserror::Error;

use crate::api::registry::HttpMethod;
use crate::api::validation::{FieldSchema, Location};
use crate::config::schema::{GatewayConfig, RouteConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("unsupported method '{method}' for route {endpoint}")]
    UnsupportedMethod { method: String, endpoint: String },

    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        endpoint: String,
        reason: &'static str,
    },

    #[error("endpoint '{endpoint}' conflicts with '{existing}': captures at the same position must share a name")]
    ConflictingEndpoint { endpoint: String, existing: String },

    #[error("route {method} {endpoint} is declared more than once")]
    DuplicateRoute { method: HttpMethod, endpoint: String },

    #[error("field '{field}' is both mandatory and optional in the {location} of {endpoint}")]
    OverlappingField {
        endpoint: String,
        location: String,
        field: String,
    },
}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = HashSet::new();
    let mut shapes = HashMap::new();
    for route in &config.routes {
        validate_route(route, &mut seen, &mut shapes, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(
    route: &RouteConfig,
    seen: &mut HashSet<(HttpMethod, String)>,
    shapes: &mut HashMap<String, (String, Vec<String>)>,
    errors: &mut Vec<ValidationError>,
) {
    match parse_endpoint(&route.endpoint) {
        Ok(parsed) => {
            // Every method on a path shares one router entry, so compare across methods.
            match shapes.get(&parsed.shape) {
                Some((existing, captures)) if *captures != parsed.captures => {
                    errors.push(ValidationError::ConflictingEndpoint {
                        endpoint: route.endpoint.clone(),
                        existing: existing.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    shapes.insert(parsed.shape, (route.endpoint.clone(), parsed.captures));
                }
            }
        }
        Err(reason) => errors.push(ValidationError::InvalidEndpoint {
            endpoint: route.endpoint.clone(),
            reason,
        }),
    }

    match HttpMethod::parse(&route.method) {
        Some(method) => {
            if !seen.insert((method, route.endpoint.clone())) {
                errors.push(ValidationError::DuplicateRoute {
                    method,
                    endpoint: route.endpoint.clone(),
                });
            }
        }
        None => errors.push(ValidationError::UnsupportedMethod {
            method: route.method.clone(),
            endpoint: route.endpoint.clone(),
        }),
    }

    check_overlap(route, route.body.as_ref(), Location::Body, errors);
    check_overlap(route, route.query.as_ref(), Location::Query, errors);
}

/// An endpoint split into its capture-free shape and capture names.
#[derive(Debug, PartialEq, Eq)]
struct ParsedEndpoint {
    /// The endpoint with `{name}` as `{}` and `{*name}` as `{*}`.
    shape: String,
    captures: Vec<String>,
}

/// Parse an absolute path using `{name}` and trailing `{*name}` captures.
fn parse_endpoint(endpoint: &str) -> Result<ParsedEndpoint, &'static str> {
    if !endpoint.starts_with('/') {
        return Err("must start with '/'");
    }
    if endpoint
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err("use {name} captures instead of ':' or '*' segments");
    }

    let mut shape = String::with_capacity(endpoint.len());
    let mut captures = Vec::new();
    let mut rest = endpoint;

    while let Some(open) = rest.find(['{', '}']) {
        if rest[open..].starts_with('}') {
            return Err("unbalanced '}'");
        }
        shape.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find(['{', '}']).ok_or("unclosed '{'")?;
        if after[close..].starts_with('{') {
            return Err("nested '{'");
        }

        let name = &after[..close];
        rest = &after[close + 1..];
        match name.strip_prefix('*') {
            Some(_) if !rest.is_empty() => return Err("catch-all capture must be last"),
            Some("") => return Err("empty capture name"),
            Some(wildcard) => {
                shape.push_str("{*}");
                captures.push(wildcard.to_string());
            }
            None if name.is_empty() => return Err("empty capture name"),
            None => {
                shape.push_str("{}");
                captures.push(name.to_string());
            }
        }
    }
    shape.push_str(rest);

    Ok(ParsedEndpoint { shape, captures })
}

fn check_overlap(
    route: &RouteConfig,
    schema: Option<&FieldSchema>,
    location: Location,
    errors: &mut Vec<ValidationError>,
) {
    let Some(schema) = schema else {
        return;
    };
    for field in schema.overlapping_fields() {
        errors.push(ValidationError::OverlappingField {
            endpoint: route.endpoint.clone(),
            location: location.to_string(),
            field: field.to_string(),
        });
    }
}
