//! Tenantry Observability
//!
//! - console logging for every binary in the workspace
//! - HTTP request/response logging middleware
//!
//! # Examples
//!
//! ```no_run
//! use tenantry_observability::init_console_logging;
//!
//! init_console_logging();
//! tracing::info!("ready");
//! ```

pub mod logging;

pub use logging::{REQUEST_ID_HEADER, init_console_logging, logging_middleware};
