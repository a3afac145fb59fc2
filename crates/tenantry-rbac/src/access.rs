//! Effective permission resolution for memberships and API tokens.
//!
//! The authorization middleware loads a membership (or an API token), turns
//! its role into a permission set, expands it and, for tokens, narrows it by
//! the token's scopes. The result is an [`AccessContext`] that individual
//! permission checks run against.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RbacError, Result};
use crate::implications::expand_permissions;
use crate::permissions::{Permission, is_known_permission};
use crate::roles::{get_role_level, role_by_key};
use crate::scopes::{ScopeSet, filter_permissions_by_scope_set};

/// A tenant membership as persisted by the membership store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Membership {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            permissions: None,
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = Some(permissions.into_iter().map(Into::into).collect());
        self
    }
}

/// The authorization-relevant part of an API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTokenGrant {
    pub role: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// The permissions a request may exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessContext {
    pub role: String,
    pub level: u8,
    pub permissions: BTreeSet<String>,
}

impl AccessContext {
    /// Check if the context holds a specific permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Check if the context holds any of the specified permissions
    pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        permissions.iter().any(|p| self.has_permission(p.as_ref()))
    }

    /// Check if the context holds all of the specified permissions
    pub fn has_all_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        permissions.iter().all(|p| self.has_permission(p.as_ref()))
    }

    /// Required permissions the context does not hold, in input order.
    pub fn missing_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> Vec<String> {
        permissions
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !self.has_permission(p))
            .map(str::to_string)
            .collect()
    }

    pub fn require_permission(&self, permission: Permission) -> Result<()> {
        if !self.has_permission(permission.as_str()) {
            return Err(RbacError::MissingPermission(permission.as_str().to_string()));
        }
        Ok(())
    }
}

/// The unexpanded permissions a role key carries. Unknown roles carry none.
fn role_permissions(role: &str) -> Vec<String> {
    match role_by_key(role) {
        Some(role) => role
            .permissions
            .iter()
            .map(|p| p.as_str().to_string())
            .collect(),
        None => {
            warn!(role = %role, "Unknown role resolved to an empty permission set");
            Vec::new()
        }
    }
}

/// Drops stored permissions that are not in the catalog; they were written by
/// something this build does not trust.
fn trusted_permissions(role: &str, stored: &[String]) -> Vec<String> {
    stored
        .iter()
        .filter(|permission| {
            let known = is_known_permission(permission);
            if !known {
                warn!(
                    role = %role,
                    permission = %permission,
                    "Dropping stored permission outside the catalog"
                );
            }
            known
        })
        .cloned()
        .collect()
}

/// Resolves the effective permissions of a session-authenticated membership.
///
/// Explicit stored permissions take precedence over the role's defaults.
pub fn resolve_membership(membership: &Membership) -> AccessContext {
    let base = match &membership.permissions {
        Some(stored) => trusted_permissions(&membership.role, stored),
        None => role_permissions(&membership.role),
    };

    AccessContext {
        role: membership.role.clone(),
        level: get_role_level(&membership.role),
        permissions: expand_permissions(base).into_iter().collect(),
    }
}

/// Resolves the effective permissions of an API-token request: the role's
/// expanded permissions narrowed by the token's scopes.
pub fn resolve_api_token(grant: &ApiTokenGrant) -> AccessContext {
    let expanded = expand_permissions(role_permissions(&grant.role));
    let scopes = ScopeSet::parse(&grant.scopes);
    let narrowed = filter_permissions_by_scope_set(&expanded, &scopes);

    AccessContext {
        role: grant.role.clone(),
        level: get_role_level(&grant.role),
        permissions: narrowed.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::SystemRole;

    #[test]
    fn test_membership_uses_role_defaults() {
        let ctx = resolve_membership(&Membership::new("author"));
        assert_eq!(ctx.level, 20);
        assert!(ctx.has_permission("content:create"));
        assert!(!ctx.has_permission("content:delete"));
    }

    #[test]
    fn test_membership_expands_manage_aliases() {
        let ctx = resolve_membership(&Membership::new("editor"));
        assert!(ctx.has_all_permissions(&["content:manage", "content:delete", "media:delete"]));
    }

    #[test]
    fn test_membership_infers_manage_from_full_set() {
        let ctx = resolve_membership(
            &Membership::new("custom").with_permissions(["settings:view", "settings:update"]),
        );
        assert!(ctx.has_permission("settings:manage"));
        assert_eq!(ctx.level, 0);
    }

    #[test]
    fn test_stored_permissions_outside_catalog_are_dropped() {
        let ctx = resolve_membership(
            &Membership::new("viewer").with_permissions(["content:view", "billing:refund"]),
        );
        assert_eq!(ctx.permissions.len(), 1);
        assert!(!ctx.has_permission("billing:refund"));
    }

    #[test]
    fn test_explicit_empty_permissions_override_role() {
        let ctx =
            resolve_membership(&Membership::new("owner").with_permissions(Vec::<String>::new()));
        assert!(ctx.permissions.is_empty());
        assert_eq!(ctx.level, 50);
    }

    #[test]
    fn test_unknown_role_has_no_access() {
        let ctx = resolve_membership(&Membership::new("ghost"));
        assert!(ctx.permissions.is_empty());
        assert_eq!(ctx.level, 0);
    }

    #[test]
    fn test_token_without_scopes_has_no_access() {
        let ctx = resolve_api_token(&ApiTokenGrant {
            role: "owner".to_string(),
            scopes: vec![],
        });
        assert!(ctx.permissions.is_empty());
    }

    #[test]
    fn test_write_token_keeps_manage_but_not_delete() {
        let ctx = resolve_api_token(&ApiTokenGrant {
            role: "editor".to_string(),
            scopes: vec!["read".to_string(), "write".to_string()],
        });
        assert!(ctx.has_permission("content:manage"));
        assert!(ctx.has_permission("content:update"));
        assert!(!ctx.has_permission("content:delete"));
        assert!(ctx.require_permission(Permission::ContentDelete).is_err());
    }

    #[test]
    fn test_read_token_is_view_only() {
        let ctx = resolve_api_token(&ApiTokenGrant {
            role: "admin".to_string(),
            scopes: vec![" READ ".to_string()],
        });
        assert!(ctx.permissions.iter().all(|p| p.ends_with(":view")));
        assert!(ctx.has_permission("users:view"));
    }

    #[test]
    fn test_full_scope_token_matches_membership() {
        let token = resolve_api_token(&ApiTokenGrant {
            role: "admin".to_string(),
            scopes: vec!["read".to_string(), "write".to_string(), "delete".to_string()],
        });
        let session = resolve_membership(&Membership::new(SystemRole::Admin.key()));
        assert_eq!(token.permissions, session.permissions);
    }

    #[test]
    fn test_missing_permissions() {
        let ctx = resolve_membership(&Membership::new("viewer"));
        assert_eq!(
            ctx.missing_permissions(&["content:view", "content:update", "menus:delete"]),
            vec!["content:update".to_string(), "menus:delete".to_string()]
        );
        assert!(ctx.has_any_permission(&["content:update", "content:view"]));
    }

    #[test]
    fn test_membership_serde_shape() {
        let membership: Membership = serde_json::from_str(r#"{"role":"editor"}"#).unwrap();
        assert_eq!(membership, Membership::new("editor"));

        let token: ApiTokenGrant =
            serde_json::from_str(r#"{"role":"author","scopes":["read","write"]}"#).unwrap();
        assert_eq!(token.scopes.len(), 2);
    }
}
