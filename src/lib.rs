//! # Tenantry API
//!
//! A stateless HTTP decision service over the Tenantry role-based access
//! control engine. The CMS admin backend asks it which permissions a member
//! or API token effectively holds, whether a role may be assigned, and
//! whether a custom role definition is acceptable.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── tenantry-rbac/           # Permission catalog, roles, expansion, scope filter
//! ├── tenantry-core/           # AppError
//! ├── tenantry-config/         # Server and CORS configuration
//! ├── tenantry-observability/  # Console logging, request logging middleware
//! └── tenantry-cli/            # Offline inspection CLI
//! src/
//! ├── modules/
//! │   ├── access/       # Expand, filter, effective access, checks
//! │   ├── health/       # Liveness
//! │   ├── permissions/  # Catalog and groups
//! │   └── roles/        # Default roles, levels, custom role validation
//! └── ...
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Calls into the engine
//! - `model.rs`: Request and response DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Role Hierarchy
//!
//! | Role | Level |
//! |------|-------|
//! | owner | 50 |
//! | admin | 40 |
//! | editor | 30 |
//! | author | 20 |
//! | viewer | 10 |
//! | anything else | 0 |
//!
//! ## Environment Variables
//!
//! ```bash
//! HOST=0.0.0.0
//! PORT=3000
//! ALLOWED_ORIGINS=http://localhost:3000,http://localhost:5173
//! LOG_LEVEL=info
//! ```
//!
//! ### API Documentation
//!
//! When the server is running, Swagger UI is available at
//! `http://localhost:3000/swagger-ui`.

pub mod docs;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use tenantry_config;
pub use tenantry_core;
pub use tenantry_rbac;
