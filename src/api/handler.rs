//! Route handlers and the named handler registry.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use crate::api::error::ApiResult;
use crate::api::response::RequestContext;
use crate::api::validation::RequestData;

/// A request as seen by a handler.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub data: RequestData,
    pub context: RequestContext,
}

impl ApiRequest {
    pub fn new(data: RequestData, context: RequestContext) -> Self {
        Self { data, context }
    }
}

/// Type-erased async handler.
pub type ApiHandler = Arc<dyn Fn(ApiRequest) -> BoxFuture<'static, ApiResult<Value>> + Send + Sync>;

/// Wrap an async function as an [`ApiHandler`].
pub fn handler_fn<F, Fut>(f: F) -> ApiHandler
where
    F: Fn(ApiRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<Value>> + Send + 'static,
{
    Arc::new(move |request| f(request).boxed())
}

/// Handlers addressable by name from configuration.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, ApiHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `echo` and `status`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert("echo", handler_fn(echo));
        registry.insert("status", handler_fn(status));
        registry
    }

    /// Add a handler, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, handler: ApiHandler) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn get(&self, name: &str) -> Option<ApiHandler> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

/// Returns the validated body and query.
async fn echo(request: ApiRequest) -> ApiResult<Value> {
    Ok(json!({
        "body": request.data.body(),
        "query": request.data.query(),
    }))
}

async fn status(_request: ApiRequest) -> ApiResult<Value> {
    Ok(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
