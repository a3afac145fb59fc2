//! Role-based access control for multi-tenant Tenantry workspaces.
//!
//! The crate holds the closed permission catalog, the system role registry,
//! the manage-alias implication rules and the scope filter applied to API
//! tokens. Everything here is immutable static data and pure functions.
//!
//! ```
//! use tenantry_rbac::{expand_permissions, filter_permissions_by_scopes, get_role_level};
//!
//! let expanded = expand_permissions(["users:manage"]);
//! assert!(expanded.contains(&"users:delete".to_string()));
//!
//! let narrowed = filter_permissions_by_scopes(&expanded, &["read"]);
//! assert_eq!(narrowed, vec!["users:view"]);
//!
//! assert_eq!(get_role_level("editor"), 30);
//! assert_eq!(get_role_level("nobody"), 0);
//! ```

pub mod access;
pub mod catalog;
pub mod custom_roles;
pub mod error;
pub mod implications;
pub mod permissions;
pub mod roles;
pub mod scopes;

pub use access::{
    AccessContext, ApiTokenGrant, Membership, resolve_api_token, resolve_membership,
};
pub use catalog::{CatalogSummary, ensure_catalog, verify_catalog};
pub use custom_roles::{CustomRoleDefinition, TenantRole, validate_custom_role};
pub use error::{RbacError, Result};
pub use implications::{
    MANAGE_ALIASES, expand_permission_set, expand_permissions, implied_permissions,
};
pub use permissions::{
    Action, PERMISSION_GROUPS, Permission, PermissionGroup, Resource, is_known_permission,
};
pub use roles::{
    Role, SystemRole, UNKNOWN_ROLE_LEVEL, can_assign_role, can_manage_role, check_role_hierarchy,
    default_roles, get_role_level, is_at_least, role_by_key,
};
pub use scopes::{Scope, ScopeSet, filter_permissions_by_scopes, normalize_scopes};
