//! Route binding onto an axum router.
//!
//! # Data Flow
//! ```text
//! axum Request
//!     → request.rs (context, query / body field maps)
//!     → validate against the route's schemas
//!     → route handler
//!     → Responder (success or failure body)
//! ```

use std::sync::Arc;

use axum::extract::Request;
use axum::response::Response;
use axum::routing::{self, MethodRouter};
use axum::Router;
use serde_json::Value;

use crate::api::error::ApiResult;
use crate::api::registry::{RouteBinder, RouteDeclaration};
use crate::api::response::{RequestContext, Responder};
use crate::api::validation::validate;
use crate::http::request::{extract_api_request, request_context};

/// A declared route served through axum.
#[derive(Clone)]
pub struct Endpoint {
    route: Arc<RouteDeclaration>,
    responder: Arc<Responder>,
    max_body_bytes: usize,
}

impl Endpoint {
    pub fn new(route: RouteDeclaration, responder: Arc<Responder>, max_body_bytes: usize) -> Self {
        Self {
            route: Arc::new(route),
            responder,
            max_body_bytes,
        }
    }

    /// Validate, run the handler and format the outcome.
    pub async fn dispatch(self, request: Request) -> Response {
        let context = request_context(&request);
        match self.run(request, context.clone()).await {
            Ok(result) => self.responder.success(result, &context),
            Err(error) => self.responder.failure(error, &context),
        }
    }

    async fn run(&self, request: Request, context: RequestContext) -> ApiResult<Value> {
        let api_request = extract_api_request(request, context, self.max_body_bytes).await?;
        validate(
            &api_request.data,
            self.route.body_schema(),
            self.route.query_schema(),
        )?;
        (self.route.handler())(api_request).await
    }
}

/// [`RouteBinder`] building an axum [`Router`].
pub struct AxumBinder {
    router: Router,
    responder: Arc<Responder>,
    max_body_bytes: usize,
}

impl AxumBinder {
    pub fn new(responder: Responder, max_body_bytes: usize) -> Self {
        Self {
            router: Router::new(),
            responder: Arc::new(responder),
            max_body_bytes,
        }
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    fn endpoint(&self, route: &RouteDeclaration) -> Endpoint {
        Endpoint::new(route.clone(), self.responder.clone(), self.max_body_bytes)
    }

    fn bind(&mut self, route: &RouteDeclaration, method_router: MethodRouter) {
        let router = std::mem::take(&mut self.router);
        self.router = router.route(route.endpoint(), method_router);
    }
}

impl RouteBinder for AxumBinder {
    fn get(&mut self, route: &RouteDeclaration) {
        let endpoint = self.endpoint(route);
        self.bind(route, routing::get(move |request: Request| endpoint.dispatch(request)));
    }

    fn post(&mut self, route: &RouteDeclaration) {
        let endpoint = self.endpoint(route);
        self.bind(route, routing::post(move |request: Request| endpoint.dispatch(request)));
    }

    fn put(&mut self, route: &RouteDeclaration) {
        let endpoint = self.endpoint(route);
        self.bind(route, routing::put(move |request: Request| endpoint.dispatch(request)));
    }

    fn delete(&mut self, route: &RouteDeclaration) {
        let endpoint = self.endpoint(route);
        self.bind(route, routing::delete(move |request: Request| endpoint.dispatch(request)));
    }
}
