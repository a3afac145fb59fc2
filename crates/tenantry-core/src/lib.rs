//! # Tenantry Core
//!
//! Types shared by every HTTP-facing crate in the workspace.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```
//! use axum::http::StatusCode;
//! use tenantry_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Role not found"));
//! assert_eq!(error.status, StatusCode::NOT_FOUND);
//! ```

pub mod errors;

pub use errors::AppError;
