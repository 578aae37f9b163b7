//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → router.rs (declared route → validation → handler)
//!     → request.rs (request ID, query / body extraction)
//!     → api::response (JSON success / failure)
//!     → Send to client
//! ```

pub mod request;
pub mod router;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use router::{AxumBinder, Endpoint};
pub use server::HttpServer;
