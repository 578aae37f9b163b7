//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, request ID on request logs)
//!     → logging.rs (subscriber: level filter, pretty or JSON output)
//! ```

pub mod logging;

pub use logging::init_logging;
