//! Route registration.
//!
//! # Responsibilities
//! - Hold declared routes (method, endpoint, handler, schemas)
//! - Bind each declaration onto a server routing table, in order
//!
//! # Design Decisions
//! - Methods are matched case-insensitively (get, post, put, delete)
//! - Unsupported methods are skipped, not fatal; configuration
//!   validation rejects them before registration
//! - Not idempotent: registering twice binds every route twice

use std::fmt;
use std::sync::Arc;

use crate::api::handler::{ApiHandler, HandlerRegistry};
use crate::api::validation::FieldSchema;
use crate::config::loader::ConfigError;
use crate::config::RouteConfig;

/// HTTP methods the registrar can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Parse a method name, ignoring case. `None` for anything unsupported.
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route bound to the server at startup.
#[derive(Clone)]
pub struct RouteDeclaration {
    method: String,
    endpoint: String,
    handler: ApiHandler,
    body_schema: Option<Arc<FieldSchema>>,
    query_schema: Option<Arc<FieldSchema>>,
}

impl RouteDeclaration {
    pub fn new(method: impl Into<String>, endpoint: impl Into<String>, handler: ApiHandler) -> Self {
        Self {
            method: method.into(),
            endpoint: endpoint.into(),
            handler,
            body_schema: None,
            query_schema: None,
        }
    }

    /// Validate request bodies against `schema` before the handler runs.
    pub fn with_body_schema(mut self, schema: FieldSchema) -> Self {
        self.body_schema = Some(Arc::new(schema));
        self
    }

    /// Validate query strings against `schema` before the handler runs.
    pub fn with_query_schema(mut self, schema: FieldSchema) -> Self {
        self.query_schema = Some(Arc::new(schema));
        self
    }

    /// Method as declared.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn handler(&self) -> &ApiHandler {
        &self.handler
    }

    pub fn body_schema(&self) -> Option<&FieldSchema> {
        self.body_schema.as_deref()
    }

    pub fn query_schema(&self) -> Option<&FieldSchema> {
        self.query_schema.as_deref()
    }

    /// Build a declaration from configuration, resolving the handler by name.
    pub fn from_config(route: &RouteConfig, handlers: &HandlerRegistry) -> Result<Self, ConfigError> {
        let handler = handlers
            .get(&route.handler)
            .ok_or_else(|| ConfigError::UnknownHandler {
                handler: route.handler.clone(),
                endpoint: route.endpoint.clone(),
            })?;

        let mut declaration = Self::new(route.method.clone(), route.endpoint.clone(), handler);
        if let Some(schema) = &route.body {
            declaration = declaration.with_body_schema(schema.clone());
        }
        if let Some(schema) = &route.query {
            declaration = declaration.with_query_schema(schema.clone());
        }
        Ok(declaration)
    }
}

impl fmt::Debug for RouteDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDeclaration")
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .field("body_schema", &self.body_schema)
            .field("query_schema", &self.query_schema)
            .finish_non_exhaustive()
    }
}

/// Resolve every configured route against `handlers`, keeping config order.
pub fn declarations_from_config(
    routes: &[RouteConfig],
    handlers: &HandlerRegistry,
) -> Result<Vec<RouteDeclaration>, ConfigError> {
    routes
        .iter()
        .map(|route| RouteDeclaration::from_config(route, handlers))
        .collect()
}

/// A server routing table with one binding call per method.
pub trait RouteBinder {
    fn get(&mut self, route: &RouteDeclaration);
    fn post(&mut self, route: &RouteDeclaration);
    fn put(&mut self, route: &RouteDeclaration);
    fn delete(&mut self, route: &RouteDeclaration);
}

/// Bind every declaration onto `server`, in order.
pub fn register<B: RouteBinder + ?Sized>(server: &mut B, declarations: &[RouteDeclaration]) {
    for route in declarations {
        let Some(method) = HttpMethod::parse(route.method()) else {
            tracing::warn!(
                method = %route.method(),
                endpoint = %route.endpoint(),
                "Unsupported method, route skipped"
            );
            continue;
        };

        match method {
            HttpMethod::Get => server.get(route),
            HttpMethod::Post => server.post(route),
            HttpMethod::Put => server.put(route),
            HttpMethod::Delete => server.delete(route),
        }
        tracing::info!("API: {} {} is registered", route.method(), route.endpoint());
    }
}
