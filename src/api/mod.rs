//! Request validation, uniform responses and route registration.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RouteDeclaration[]
//!     → registry.rs (bind each route onto the server, in order)
//!
//! Per request:
//!     RequestData (body / query maps)
//!     → validation.rs (schema check, first violation wins)
//!     → handler.rs (route handler)
//!     → response.rs (200 + result, or 400/500 failure body)
//! ```
//!
//! # Design Decisions
//! - Schemas and declarations are immutable once built
//! - Failures are `ApiError` values classified as user or internal
//! - The responder is the only place that picks status codes

pub mod error;
pub mod handler;
pub mod registry;
pub mod response;
pub mod validation;

pub use error::{ApiError, ApiResult, ErrorKind};
pub use handler::{handler_fn, ApiHandler, ApiRequest, HandlerRegistry};
pub use registry::{register, HttpMethod, RouteBinder, RouteDeclaration};
pub use response::{send_failure, send_success, FailureBody, RequestContext, Responder};
pub use validation::{validate, FieldMap, FieldSchema, RequestData};
