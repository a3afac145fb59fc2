//! Report builders behind each CLI subcommand.

use std::fmt;

use serde::Serialize;
use tenantry_rbac::permissions::{group_by_key, permission_group};
use tenantry_rbac::{
    AccessContext, ApiTokenGrant, CatalogSummary, Membership, PERMISSION_GROUPS, Permission,
    PermissionGroup, RbacError, Role, can_assign_role, default_roles, expand_permissions,
    filter_permissions_by_scopes, get_role_level, implied_permissions, normalize_scopes,
    resolve_api_token, resolve_membership, role_by_key, verify_catalog,
};

use crate::output::join_or_dash;

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Serialize)]
pub struct VerifyReport(pub CatalogSummary);

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "✅ Catalog verified: {} permissions, {} groups, {} manage aliases, {} roles",
            self.0.permissions, self.0.groups, self.0.manage_aliases, self.0.roles
        )
    }
}

pub fn verify() -> Result<VerifyReport, RbacError> {
    verify_catalog().map(VerifyReport)
}

#[derive(Debug, Serialize)]
pub struct PermissionEntry {
    pub key: &'static str,
    pub group: Option<&'static str>,
    pub is_manage_alias: bool,
    pub implies: Vec<&'static str>,
}

impl From<Permission> for PermissionEntry {
    fn from(permission: Permission) -> Self {
        Self {
            key: permission.as_str(),
            group: permission_group(permission).map(|group| group.key),
            is_manage_alias: permission.is_manage_alias(),
            implies: implied_permissions(permission)
                .iter()
                .map(|p| p.as_str())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct PermissionList(pub Vec<PermissionEntry>);

impl fmt::Display for PermissionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", entry.key)?;
            if entry.is_manage_alias {
                write!(f, "  => {}", join_or_dash(&entry.implies))?;
            }
        }
        Ok(())
    }
}

/// Lists the catalog, optionally restricted to one group.
pub fn permissions(group: Option<&str>) -> Result<PermissionList, RbacError> {
    let selected: Vec<Permission> = match group {
        Some(key) => group_by_key(key)
            .ok_or_else(|| RbacError::Validation(format!("unknown permission group: {key}")))?
            .permissions
            .to_vec(),
        None => Permission::ALL.to_vec(),
    };

    Ok(PermissionList(selected.into_iter().map(PermissionEntry::from).collect()))
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct GroupList(pub Vec<PermissionGroup>);

impl fmt::Display for GroupList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<12} {:<12} {}",
                group.key,
                group.label,
                join_or_dash(group.permissions.iter().map(|p| p.as_str()))
            )?;
        }
        Ok(())
    }
}

pub fn groups() -> GroupList {
    GroupList(PERMISSION_GROUPS.to_vec())
}

// =============================================================================
// Roles
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RoleList(pub Vec<Role>);

impl fmt::Display for RoleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<8} {:>3}  {:<14} {} permissions",
                role.key,
                role.level,
                role.name,
                role.permissions.len()
            )?;
        }
        Ok(())
    }
}

pub fn roles() -> RoleList {
    RoleList(default_roles().to_vec())
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RoleDetail(pub Role);

impl fmt::Display for RoleDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = &self.0;
        writeln!(f, "{} ({})", role.name, role.key)?;
        writeln!(f, "Level: {}", role.level)?;
        writeln!(f, "{}", role.description)?;
        write!(
            f,
            "Permissions: {}",
            join_or_dash(role.permissions.iter().map(|p| p.as_str()))
        )
    }
}

pub fn role(key: &str) -> Result<RoleDetail, RbacError> {
    role_by_key(key)
        .cloned()
        .map(RoleDetail)
        .ok_or_else(|| RbacError::UnknownRole(key.to_string()))
}

#[derive(Debug, Serialize)]
pub struct LevelReport {
    pub key: String,
    pub level: u8,
}

impl fmt::Display for LevelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.level)
    }
}

/// Never fails: unknown roles report level 0.
pub fn level(key: &str) -> LevelReport {
    LevelReport {
        key: key.to_string(),
        level: get_role_level(key),
    }
}

#[derive(Debug, Serialize)]
pub struct AssignReport {
    pub actor_role: String,
    pub target_role: String,
    pub allowed: bool,
    pub actor_level: u8,
    pub target_level: u8,
}

impl fmt::Display for AssignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.allowed { "✅ may assign" } else { "❌ may not assign" };
        write!(
            f,
            "{} ({}) {verdict} {} ({})",
            self.actor_role, self.actor_level, self.target_role, self.target_level
        )
    }
}

pub fn can_assign(actor_role: &str, target_role: &str) -> AssignReport {
    AssignReport {
        actor_role: actor_role.to_string(),
        target_role: target_role.to_string(),
        allowed: can_assign_role(actor_role, target_role),
        actor_level: get_role_level(actor_role),
        target_level: get_role_level(target_role),
    }
}

// =============================================================================
// Access evaluation
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PermissionSet {
    pub permissions: Vec<String>,
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.permissions.is_empty() {
            return f.write_str("(no permissions)");
        }
        f.write_str(&self.permissions.join("\n"))
    }
}

pub fn expand(permissions: &[String]) -> PermissionSet {
    PermissionSet {
        permissions: expand_permissions(permissions),
    }
}

pub fn filter(permissions: &[String], scopes: &[String]) -> PermissionSet {
    PermissionSet {
        permissions: filter_permissions_by_scopes(permissions, scopes),
    }
}

#[derive(Debug, Serialize)]
pub struct EffectiveReport {
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(flatten)]
    pub context: AccessContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

impl fmt::Display for EffectiveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Role: {} (level {}) via {}",
            self.context.role, self.context.level, self.source
        )?;
        if let Some(scopes) = &self.scopes {
            writeln!(f, "Scopes: {}", join_or_dash(scopes))?;
        }
        write!(
            f,
            "Permissions: {}",
            join_or_dash(&self.context.permissions)
        )?;
        if let Some(missing) = &self.missing {
            if missing.is_empty() {
                write!(f, "\n✅ All required permissions granted")?;
            } else {
                write!(f, "\n❌ Missing: {}", missing.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Effective access of a role.
///
/// With `scopes` the role is evaluated as an API token, otherwise as a
/// membership whose stored permissions are `permissions` when given.
pub fn effective(
    role: &str,
    scopes: Option<&[String]>,
    permissions: Option<&[String]>,
    required: &[String],
) -> EffectiveReport {
    let (source, scopes, context) = match scopes {
        Some(scopes) => {
            let grant = ApiTokenGrant {
                role: role.to_string(),
                scopes: scopes.to_vec(),
            };
            ("api-token", Some(normalize_scopes(scopes)), resolve_api_token(&grant))
        }
        None => {
            let mut membership = Membership::new(role);
            if let Some(permissions) = permissions {
                membership = membership.with_permissions(permissions.iter().cloned());
            }
            ("membership", None, resolve_membership(&membership))
        }
    };

    let missing = (!required.is_empty()).then(|| context.missing_permissions(required));

    EffectiveReport {
        source,
        scopes,
        context,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_verify_reports_counts() {
        let report = verify().unwrap();
        assert_eq!(
            report.to_string(),
            "✅ Catalog verified: 59 permissions, 14 groups, 11 manage aliases, 5 roles"
        );
    }

    #[test]
    fn test_permissions_for_group() {
        let list = permissions(Some("settings")).unwrap();
        assert_eq!(
            list.to_string(),
            "settings:view\nsettings:update\nsettings:manage  => settings:view, settings:update"
        );
        assert!(permissions(Some("billing")).is_err());
    }

    #[test]
    fn test_permissions_json() {
        let json = render(&permissions(None).unwrap(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 59);
        assert_eq!(value[0]["key"], "dashboard:view");
        assert_eq!(value[0]["group"], "dashboard");
    }

    #[test]
    fn test_roles_listing() {
        let text = roles().to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("owner"));
        assert!(first.contains("50"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_unknown_role_detail_fails() {
        assert!(role("editor").is_ok());
        assert_eq!(
            role("ghost").unwrap_err(),
            RbacError::UnknownRole("ghost".to_string())
        );
    }

    #[test]
    fn test_level_of_unknown_role() {
        assert_eq!(level("ghost").to_string(), "ghost: 0");
    }

    #[test]
    fn test_expand_and_filter() {
        let expanded = expand(&strings(&["menus:manage"]));
        assert!(expanded.permissions.contains(&"menus:delete".to_string()));

        let filtered = filter(&expanded.permissions, &strings(&["write"]));
        assert!(filtered.permissions.contains(&"menus:manage".to_string()));
        assert!(!filtered.permissions.contains(&"menus:delete".to_string()));

        assert_eq!(filter(&expanded.permissions, &[]).to_string(), "(no permissions)");
    }

    #[test]
    fn test_effective_token_with_requirements() {
        let report = effective(
            "editor",
            Some(strings(&["Read"]).as_slice()),
            None,
            &strings(&["content:view", "content:update"]),
        );
        assert_eq!(report.source, "api-token");
        assert_eq!(report.scopes, Some(strings(&["read"])));
        assert_eq!(report.missing, Some(strings(&["content:update"])));
        assert!(report.to_string().contains("❌ Missing: content:update"));
    }

    #[test]
    fn test_effective_membership_json_is_flat() {
        let report = effective("viewer", None, None, &[]);
        let value: serde_json::Value =
            serde_json::from_str(&render(&report, true).unwrap()).unwrap();
        assert_eq!(value["source"], "membership");
        assert_eq!(value["level"], 10);
        assert!(value.get("missing").is_none());
    }

    #[test]
    fn test_effective_unknown_role_renders_json() {
        let report = effective("ghost", None, None, &strings(&["content:view"]));
        let value: serde_json::Value =
            serde_json::from_str(&render(&report, true).unwrap()).unwrap();
        assert_eq!(value["role"], "ghost");
        assert_eq!(value["level"], 0);
        assert!(value["permissions"].as_array().unwrap().is_empty());
        assert_eq!(value["missing"], serde_json::json!(["content:view"]));
    }

    #[test]
    fn test_can_assign_owner() {
        assert!(can_assign("owner", "owner").allowed);
        let report = can_assign("admin", "owner");
        assert!(!report.allowed);
        assert_eq!(report.to_string(), "admin (40) ❌ may not assign owner (50)");
    }
}
