//! # Tenantry CLI
//!
//! Offline inspection of the permission catalog and role registry.
//!
//! Every command produces a report that renders either as plain text or as
//! JSON, so the same code backs interactive use and scripting.
//!
//! ```
//! use tenantry_cli::{commands, render};
//!
//! let report = commands::level("editor");
//! assert_eq!(render(&report, false).unwrap(), "editor: 30");
//! ```

pub mod commands;
pub mod output;

pub use output::render;
