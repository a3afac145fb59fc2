//! Error types for the RBAC engine.
//!
//! Most engine operations are total and never fail: unknown role keys resolve
//! to level 0 and empty scope sets resolve to no access. Errors only surface
//! when parsing untrusted input into catalog types, when validating a custom
//! role, or when the static catalog itself is inconsistent.

use thiserror::Error;

use crate::permissions::Permission;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    #[error("unknown permission: {0}")]
    UnknownPermission(String),

    #[error("unknown scope: {0}")]
    UnknownScope(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("role key '{0}' is reserved for a system role")]
    ReservedRoleKey(String),

    #[error("role level {requested} exceeds the actor's level {actor_level}")]
    RoleLevelTooHigh { requested: u8, actor_level: u8 },

    #[error("actor cannot grant permissions it does not hold: {}", join(.0))]
    PermissionNotHeld(Vec<Permission>),

    #[error("role '{actual}' is below the required role '{required}'")]
    InsufficientRole { actual: String, required: String },

    #[error("missing required permission: {0}")]
    MissingPermission(String),

    #[error("{0}")]
    Validation(String),

    #[error("permission catalog is inconsistent: {}", .0.join("; "))]
    CatalogInconsistent(Vec<String>),
}

fn join(permissions: &[Permission]) -> String {
    permissions
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, RbacError>;
