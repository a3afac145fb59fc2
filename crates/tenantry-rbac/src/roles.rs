//! System role registry and role hierarchy.
//!
//! Five system roles ship with every tenant. Each is a hand-curated bundle of
//! permissions plus a numeric level used for hierarchy comparisons:
//!
//! | Key | Level |
//! |-----|-------|
//! | `owner` | 50 |
//! | `admin` | 40 |
//! | `editor` | 30 |
//! | `author` | 20 |
//! | `viewer` | 10 |
//!
//! Unknown role keys resolve to level 0, the least privileged level.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::error::{RbacError, Result};
use crate::permissions::Permission;

use Permission as P;

/// Level assigned to any role key outside the registry.
pub const UNKNOWN_ROLE_LEVEL: u8 = 0;

/// The built-in roles every tenant starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemRole {
    Owner,
    Admin,
    Editor,
    Author,
    Viewer,
}

impl SystemRole {
    /// All system roles, most privileged first.
    pub const ALL: &'static [SystemRole] = &[
        SystemRole::Owner,
        SystemRole::Admin,
        SystemRole::Editor,
        SystemRole::Author,
        SystemRole::Viewer,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            SystemRole::Owner => "owner",
            SystemRole::Admin => "admin",
            SystemRole::Editor => "editor",
            SystemRole::Author => "author",
            SystemRole::Viewer => "viewer",
        }
    }

    /// Higher is more privileged.
    pub const fn level(self) -> u8 {
        match self {
            SystemRole::Owner => 50,
            SystemRole::Admin => 40,
            SystemRole::Editor => 30,
            SystemRole::Author => 20,
            SystemRole::Viewer => 10,
        }
    }

    pub fn from_key(key: &str) -> Option<SystemRole> {
        match key {
            "owner" => Some(SystemRole::Owner),
            "admin" => Some(SystemRole::Admin),
            "editor" => Some(SystemRole::Editor),
            "author" => Some(SystemRole::Author),
            "viewer" => Some(SystemRole::Viewer),
            _ => None,
        }
    }

    pub fn role(self) -> &'static Role {
        // The registry is built from SystemRole::ALL, so every variant is present.
        &default_roles()[self as usize]
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A named, leveled bundle of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub key: String,
    pub name: String,
    pub description: String,
    pub level: u8,
    pub permissions: Vec<Permission>,
    pub is_default: bool,
    pub is_system: bool,
}

impl Role {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    P::DashboardView,
    P::UsersView,
    P::UsersCreate,
    P::UsersUpdate,
    P::UsersDelete,
    P::UsersInvite,
    P::UsersAssignRole,
    P::UsersManage,
    P::RolesView,
    P::RolesCreate,
    P::RolesUpdate,
    P::RolesDelete,
    P::RolesManage,
    P::ProfileView,
    P::ProfileUpdate,
    P::TenantsView,
    P::TenantsUpdate,
    P::ContentView,
    P::ContentCreate,
    P::ContentUpdate,
    P::ContentDelete,
    P::ContentManage,
    P::MediaView,
    P::MediaCreate,
    P::MediaUpdate,
    P::MediaDelete,
    P::MediaManage,
    P::CategoriesView,
    P::CategoriesCreate,
    P::CategoriesUpdate,
    P::CategoriesDelete,
    P::CategoriesManage,
    P::CollectionsView,
    P::CollectionsCreate,
    P::CollectionsUpdate,
    P::CollectionsDelete,
    P::CollectionsManage,
    P::FormsView,
    P::FormsCreate,
    P::FormsUpdate,
    P::FormsDelete,
    P::FormsManage,
    P::PlacementsView,
    P::PlacementsCreate,
    P::PlacementsUpdate,
    P::PlacementsDelete,
    P::PlacementsManage,
    P::MenusView,
    P::MenusCreate,
    P::MenusUpdate,
    P::MenusDelete,
    P::MenusManage,
    P::AnalyticsView,
    P::SettingsView,
    P::SettingsUpdate,
    P::SettingsManage,
];

const EDITOR_PERMISSIONS: &[Permission] = &[
    P::DashboardView,
    P::UsersView,
    P::RolesView,
    P::ProfileView,
    P::ProfileUpdate,
    P::ContentView,
    P::ContentCreate,
    P::ContentUpdate,
    P::ContentDelete,
    P::ContentManage,
    P::MediaView,
    P::MediaCreate,
    P::MediaUpdate,
    P::MediaDelete,
    P::MediaManage,
    P::CategoriesView,
    P::CategoriesCreate,
    P::CategoriesUpdate,
    P::CategoriesDelete,
    P::CategoriesManage,
    P::CollectionsView,
    P::CollectionsCreate,
    P::CollectionsUpdate,
    P::FormsView,
    P::FormsCreate,
    P::FormsUpdate,
    P::PlacementsView,
    P::PlacementsCreate,
    P::PlacementsUpdate,
    P::MenusView,
    P::MenusCreate,
    P::MenusUpdate,
    P::AnalyticsView,
];

const AUTHOR_PERMISSIONS: &[Permission] = &[
    P::DashboardView,
    P::ProfileView,
    P::ProfileUpdate,
    P::ContentView,
    P::ContentCreate,
    P::ContentUpdate,
    P::MediaView,
    P::MediaCreate,
    P::CategoriesView,
    P::CollectionsView,
    P::FormsView,
    P::MenusView,
];

const VIEWER_PERMISSIONS: &[Permission] = &[
    P::DashboardView,
    P::ProfileView,
    P::ProfileUpdate,
    P::ContentView,
    P::MediaView,
    P::CategoriesView,
    P::CollectionsView,
    P::FormsView,
    P::PlacementsView,
    P::MenusView,
    P::AnalyticsView,
];

fn system_role(
    role: SystemRole,
    name: &str,
    description: &str,
    permissions: &[Permission],
) -> Role {
    Role {
        key: role.key().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        level: role.level(),
        permissions: permissions.to_vec(),
        is_default: true,
        is_system: true,
    }
}

static DEFAULT_ROLES: LazyLock<Vec<Role>> = LazyLock::new(|| {
    SystemRole::ALL
        .iter()
        .map(|role| match role {
            SystemRole::Owner => system_role(
                *role,
                "Owner",
                "Full access to the tenant, including tenant lifecycle and ownership transfer.",
                Permission::ALL,
            ),
            SystemRole::Admin => system_role(
                *role,
                "Administrator",
                "Manages members, roles, content and settings for the tenant.",
                ADMIN_PERMISSIONS,
            ),
            SystemRole::Editor => system_role(
                *role,
                "Editor",
                "Manages all content and media and maintains site structure.",
                EDITOR_PERMISSIONS,
            ),
            SystemRole::Author => system_role(
                *role,
                "Author",
                "Writes and edits content and uploads media.",
                AUTHOR_PERMISSIONS,
            ),
            SystemRole::Viewer => system_role(
                *role,
                "Viewer",
                "Read-only access to the dashboard and published content.",
                VIEWER_PERMISSIONS,
            ),
        })
        .collect()
});

/// The default role registry, most privileged first.
pub fn default_roles() -> &'static [Role] {
    &DEFAULT_ROLES
}

pub fn role_by_key(key: &str) -> Option<&'static Role> {
    SystemRole::from_key(key).map(SystemRole::role)
}

/// Returns the hierarchy level of a role key, or [`UNKNOWN_ROLE_LEVEL`] for
/// anything outside the registry.
pub fn get_role_level(role_key: &str) -> u8 {
    SystemRole::from_key(role_key)
        .map(SystemRole::level)
        .unwrap_or(UNKNOWN_ROLE_LEVEL)
}

/// Check if a role is at least as privileged as another.
pub fn is_at_least(actor_role: &str, required_role: &str) -> bool {
    get_role_level(actor_role) >= get_role_level(required_role)
}

/// Check if an actor may manage members holding `target_role`.
///
/// Unknown actors can manage nothing, even unknown targets.
pub fn can_manage_role(actor_role: &str, target_role: &str) -> bool {
    let actor_level = get_role_level(actor_role);
    actor_level > UNKNOWN_ROLE_LEVEL && actor_level >= get_role_level(target_role)
}

/// Check if an actor may assign `target_role` to someone else.
///
/// Same rule as [`can_manage_role`], except that only an owner can grant the
/// owner role.
pub fn can_assign_role(actor_role: &str, target_role: &str) -> bool {
    if SystemRole::from_key(target_role) == Some(SystemRole::Owner) {
        return SystemRole::from_key(actor_role) == Some(SystemRole::Owner);
    }
    can_manage_role(actor_role, target_role)
}

/// Check if a role has at least the specified level of access.
///
/// # Example
///
/// ```
/// use tenantry_rbac::roles::check_role_hierarchy;
///
/// assert!(check_role_hierarchy("admin", "editor").is_ok());
/// assert!(check_role_hierarchy("author", "editor").is_err());
/// ```
pub fn check_role_hierarchy(actor_role: &str, required_role: &str) -> Result<()> {
    if !is_at_least(actor_role, required_role) {
        return Err(RbacError::InsufficientRole {
            actual: actor_role.to_string(),
            required: required_role.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_levels() {
        assert_eq!(get_role_level("owner"), 50);
        assert_eq!(get_role_level("admin"), 40);
        assert_eq!(get_role_level("editor"), 30);
        assert_eq!(get_role_level("author"), 20);
        assert_eq!(get_role_level("viewer"), 10);
    }

    #[test]
    fn test_unknown_role_is_level_zero() {
        assert_eq!(get_role_level("unknown-role"), 0);
        assert_eq!(get_role_level(""), 0);
        assert_eq!(get_role_level("Owner"), 0);
        assert_eq!(get_role_level(" owner"), 0);
    }

    #[test]
    fn test_level_ordering() {
        assert!(get_role_level("owner") > get_role_level("admin"));
        assert!(get_role_level("admin") > get_role_level("editor"));
        assert!(get_role_level("editor") > get_role_level("author"));
        assert!(get_role_level("author") > get_role_level("viewer"));
        assert!(get_role_level("viewer") > get_role_level("unknown-role"));
    }

    #[test]
    fn test_registry_order_and_flags() {
        let keys: Vec<&str> = default_roles().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["owner", "admin", "editor", "author", "viewer"]);
        assert!(default_roles().iter().all(|r| r.is_system && r.is_default));
    }

    #[test]
    fn test_system_role_lookup() {
        for role in SystemRole::ALL {
            assert_eq!(role.role().key, role.key());
            assert_eq!(role.role().level, role.level());
            assert_eq!(SystemRole::from_key(role.key()), Some(*role));
        }
        assert!(role_by_key("superadmin").is_none());
    }

    #[test]
    fn test_owner_holds_entire_catalog() {
        let owner = SystemRole::Owner.role();
        assert_eq!(owner.permissions, Permission::ALL.to_vec());
    }

    #[test]
    fn test_admin_cannot_manage_tenant_lifecycle() {
        let admin = SystemRole::Admin.role();
        assert!(admin.has_permission(P::TenantsUpdate));
        assert!(!admin.has_permission(P::TenantsDelete));
        assert!(!admin.has_permission(P::TenantsManage));
    }

    #[test]
    fn test_viewer_has_no_write_permissions() {
        let viewer = SystemRole::Viewer.role();
        assert!(viewer.permissions.iter().all(|p| {
            matches!(p.action(), crate::permissions::Action::View) || *p == P::ProfileUpdate
        }));
    }

    #[test]
    fn test_can_manage_role() {
        assert!(can_manage_role("admin", "editor"));
        assert!(can_manage_role("admin", "admin"));
        assert!(!can_manage_role("editor", "admin"));
        assert!(!can_manage_role("stranger", "viewer"));
        assert!(!can_manage_role("stranger", "other-stranger"));
        assert!(can_manage_role("viewer", "custom-role"));
    }

    #[test]
    fn test_only_owner_assigns_owner() {
        assert!(can_assign_role("owner", "owner"));
        assert!(!can_assign_role("admin", "owner"));
        assert!(can_assign_role("owner", "admin"));
        assert!(can_assign_role("admin", "admin"));
        assert!(!can_assign_role("editor", "admin"));
    }

    #[test]
    fn test_check_role_hierarchy() {
        assert!(check_role_hierarchy("owner", "viewer").is_ok());
        assert_eq!(
            check_role_hierarchy("viewer", "author"),
            Err(RbacError::InsufficientRole {
                actual: "viewer".to_string(),
                required: "author".to_string()
            })
        );
    }
}
