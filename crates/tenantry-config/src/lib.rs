//! # Tenantry Config
//!
//! Configuration types for the Tenantry API, loaded from environment
//! variables (after `.env` has been read by the binary):
//!
//! - [`server`]: listen address
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```
//! use tenantry_config::{CorsConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let cors = CorsConfig::from_env();
//! # let _ = (server, cors);
//! ```

pub mod cors;
pub mod server;

pub use cors::CorsConfig;
pub use server::ServerConfig;
