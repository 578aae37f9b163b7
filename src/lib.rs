//! Request validation and route registration for Axum services.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use api::{ApiError, ErrorKind, FieldSchema, RequestData, RouteDeclaration};
pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
