//! The closed permission catalog.
//!
//! Every permission is a `resource:action` pair known at compile time. Using
//! the [`Permission`] enum instead of string literals ensures that role
//! bundles, implication tables and permission checks can only reference
//! permissions that actually exist.
//!
//! # Example
//!
//! ```
//! use tenantry_rbac::permissions::{Action, Permission, Resource};
//!
//! let perm: Permission = "users:invite".parse().unwrap();
//! assert_eq!(perm, Permission::UsersInvite);
//! assert_eq!(perm.resource(), Resource::Users);
//! assert_eq!(perm.action(), Action::Invite);
//! assert_eq!(perm.to_string(), "users:invite");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RbacError;

/// Separator between the resource and the action of a permission string.
pub const PERMISSION_DELIMITER: char = ':';

/// A resource that permissions are granted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Dashboard,
    Users,
    Roles,
    Profile,
    Tenants,
    Content,
    Media,
    Categories,
    Collections,
    Forms,
    Placements,
    Menus,
    Analytics,
    Settings,
}

impl Resource {
    pub const ALL: &'static [Resource] = &[
        Resource::Dashboard,
        Resource::Users,
        Resource::Roles,
        Resource::Profile,
        Resource::Tenants,
        Resource::Content,
        Resource::Media,
        Resource::Categories,
        Resource::Collections,
        Resource::Forms,
        Resource::Placements,
        Resource::Menus,
        Resource::Analytics,
        Resource::Settings,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::Users => "users",
            Resource::Roles => "roles",
            Resource::Profile => "profile",
            Resource::Tenants => "tenants",
            Resource::Content => "content",
            Resource::Media => "media",
            Resource::Categories => "categories",
            Resource::Collections => "collections",
            Resource::Forms => "forms",
            Resource::Placements => "placements",
            Resource::Menus => "menus",
            Resource::Analytics => "analytics",
            Resource::Settings => "settings",
        }
    }

    /// Permissions of this resource, in catalog order.
    pub fn permissions(self) -> impl Iterator<Item = Permission> {
        Permission::ALL
            .iter()
            .copied()
            .filter(move |p| p.resource() == self)
    }

    /// The `manage` alias of this resource, if it has one.
    pub fn manage_alias(self) -> Option<Permission> {
        self.permissions().find(|p| p.action() == Action::Manage)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action a permission allows on its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Invite,
    AssignRole,
    Manage,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Invite => "invite",
            Action::AssignRole => "assign-role",
            Action::Manage => "manage",
        }
    }

    /// Parses an action suffix. Returns `None` for anything outside the
    /// known action vocabulary.
    pub fn parse(action: &str) -> Option<Action> {
        match action {
            "view" => Some(Action::View),
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "invite" => Some(Action::Invite),
            "assign-role" => Some(Action::AssignRole),
            "manage" => Some(Action::Manage),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares the [`Permission`] enum together with its resource, action and
/// wire string so the three can never drift apart.
macro_rules! permission_catalog {
    ($(
        $(#[$meta:meta])*
        $variant:ident => ($resource:ident, $action:ident, $wire:literal),
    )+) => {
        /// A permission from the closed catalog.
        ///
        /// Variants are declared in catalog order; `Ord` follows that order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Permission {
            $( $(#[$meta])* $variant, )+
        }

        impl Permission {
            /// The entire catalog, in declaration order.
            pub const ALL: &'static [Permission] = &[ $( Permission::$variant, )+ ];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Permission::$variant => $wire, )+
                }
            }

            pub const fn resource(self) -> Resource {
                match self {
                    $( Permission::$variant => Resource::$resource, )+
                }
            }

            pub const fn action(self) -> Action {
                match self {
                    $( Permission::$variant => Action::$action, )+
                }
            }
        }

        impl FromStr for Permission {
            type Err = RbacError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Permission::$variant), )+
                    other => Err(RbacError::UnknownPermission(other.to_string())),
                }
            }
        }
    };
}

permission_catalog! {
    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Permission to open the tenant dashboard
    DashboardView => (Dashboard, View, "dashboard:view"),

    // =========================================================================
    // Users
    // =========================================================================

    /// Permission to list and read tenant members
    UsersView => (Users, View, "users:view"),
    /// Permission to add members directly
    UsersCreate => (Users, Create, "users:create"),
    /// Permission to edit member details
    UsersUpdate => (Users, Update, "users:update"),
    /// Permission to remove members
    UsersDelete => (Users, Delete, "users:delete"),
    /// Permission to send invitations
    UsersInvite => (Users, Invite, "users:invite"),
    /// Permission to change a member's role
    UsersAssignRole => (Users, AssignRole, "users:assign-role"),
    /// All user permissions
    UsersManage => (Users, Manage, "users:manage"),

    // =========================================================================
    // Roles
    // =========================================================================

    /// Permission to read role definitions
    RolesView => (Roles, View, "roles:view"),
    /// Permission to create custom roles
    RolesCreate => (Roles, Create, "roles:create"),
    /// Permission to edit custom roles
    RolesUpdate => (Roles, Update, "roles:update"),
    /// Permission to delete custom roles
    RolesDelete => (Roles, Delete, "roles:delete"),
    /// All role permissions
    RolesManage => (Roles, Manage, "roles:manage"),

    // =========================================================================
    // Profile
    // =========================================================================

    /// Permission to read one's own profile
    ProfileView => (Profile, View, "profile:view"),
    /// Permission to edit one's own profile
    ProfileUpdate => (Profile, Update, "profile:update"),

    // =========================================================================
    // Tenants
    // =========================================================================

    TenantsView => (Tenants, View, "tenants:view"),
    TenantsCreate => (Tenants, Create, "tenants:create"),
    TenantsUpdate => (Tenants, Update, "tenants:update"),
    TenantsDelete => (Tenants, Delete, "tenants:delete"),
    TenantsManage => (Tenants, Manage, "tenants:manage"),

    // =========================================================================
    // Content
    // =========================================================================

    ContentView => (Content, View, "content:view"),
    ContentCreate => (Content, Create, "content:create"),
    ContentUpdate => (Content, Update, "content:update"),
    ContentDelete => (Content, Delete, "content:delete"),
    ContentManage => (Content, Manage, "content:manage"),

    // =========================================================================
    // Media
    // =========================================================================

    MediaView => (Media, View, "media:view"),
    /// Permission to upload media
    MediaCreate => (Media, Create, "media:create"),
    MediaUpdate => (Media, Update, "media:update"),
    MediaDelete => (Media, Delete, "media:delete"),
    MediaManage => (Media, Manage, "media:manage"),

    // =========================================================================
    // Categories
    // =========================================================================

    CategoriesView => (Categories, View, "categories:view"),
    CategoriesCreate => (Categories, Create, "categories:create"),
    CategoriesUpdate => (Categories, Update, "categories:update"),
    CategoriesDelete => (Categories, Delete, "categories:delete"),
    CategoriesManage => (Categories, Manage, "categories:manage"),

    // =========================================================================
    // Collections
    // =========================================================================

    CollectionsView => (Collections, View, "collections:view"),
    CollectionsCreate => (Collections, Create, "collections:create"),
    CollectionsUpdate => (Collections, Update, "collections:update"),
    CollectionsDelete => (Collections, Delete, "collections:delete"),
    CollectionsManage => (Collections, Manage, "collections:manage"),

    // =========================================================================
    // Forms
    // =========================================================================

    FormsView => (Forms, View, "forms:view"),
    FormsCreate => (Forms, Create, "forms:create"),
    FormsUpdate => (Forms, Update, "forms:update"),
    FormsDelete => (Forms, Delete, "forms:delete"),
    FormsManage => (Forms, Manage, "forms:manage"),

    // =========================================================================
    // Placements
    // =========================================================================

    PlacementsView => (Placements, View, "placements:view"),
    PlacementsCreate => (Placements, Create, "placements:create"),
    PlacementsUpdate => (Placements, Update, "placements:update"),
    PlacementsDelete => (Placements, Delete, "placements:delete"),
    PlacementsManage => (Placements, Manage, "placements:manage"),

    // =========================================================================
    // Menus
    // =========================================================================

    MenusView => (Menus, View, "menus:view"),
    MenusCreate => (Menus, Create, "menus:create"),
    MenusUpdate => (Menus, Update, "menus:update"),
    MenusDelete => (Menus, Delete, "menus:delete"),
    MenusManage => (Menus, Manage, "menus:manage"),

    // =========================================================================
    // Analytics
    // =========================================================================

    /// Permission to read tenant analytics
    AnalyticsView => (Analytics, View, "analytics:view"),

    // =========================================================================
    // Settings
    // =========================================================================

    /// Permission to read tenant settings
    SettingsView => (Settings, View, "settings:view"),
    /// Permission to change tenant settings
    SettingsUpdate => (Settings, Update, "settings:update"),
    /// All settings permissions
    SettingsManage => (Settings, Manage, "settings:manage"),
}

impl Permission {
    pub const fn is_manage_alias(self) -> bool {
        matches!(self.action(), Action::Manage)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Returns `true` if the string names a permission from the catalog.
pub fn is_known_permission(permission: &str) -> bool {
    permission.parse::<Permission>().is_ok()
}

/// A presentation bucket of permissions, matching a section of the role
/// editor. Groups carry no authorization meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionGroup {
    pub key: &'static str,
    pub label: &'static str,
    pub permissions: &'static [Permission],
}

use Permission as P;

/// Permission groups in the order the role editor lists them.
pub const PERMISSION_GROUPS: &[PermissionGroup] = &[
    PermissionGroup {
        key: "dashboard",
        label: "Dashboard",
        permissions: &[P::DashboardView],
    },
    PermissionGroup {
        key: "users",
        label: "Users",
        permissions: &[
            P::UsersView,
            P::UsersCreate,
            P::UsersUpdate,
            P::UsersDelete,
            P::UsersInvite,
            P::UsersAssignRole,
            P::UsersManage,
        ],
    },
    PermissionGroup {
        key: "roles",
        label: "Roles",
        permissions: &[
            P::RolesView,
            P::RolesCreate,
            P::RolesUpdate,
            P::RolesDelete,
            P::RolesManage,
        ],
    },
    PermissionGroup {
        key: "profile",
        label: "Profile",
        permissions: &[P::ProfileView, P::ProfileUpdate],
    },
    PermissionGroup {
        key: "tenants",
        label: "Tenants",
        permissions: &[
            P::TenantsView,
            P::TenantsCreate,
            P::TenantsUpdate,
            P::TenantsDelete,
            P::TenantsManage,
        ],
    },
    PermissionGroup {
        key: "content",
        label: "Content",
        permissions: &[
            P::ContentView,
            P::ContentCreate,
            P::ContentUpdate,
            P::ContentDelete,
            P::ContentManage,
        ],
    },
    PermissionGroup {
        key: "media",
        label: "Media",
        permissions: &[
            P::MediaView,
            P::MediaCreate,
            P::MediaUpdate,
            P::MediaDelete,
            P::MediaManage,
        ],
    },
    PermissionGroup {
        key: "categories",
        label: "Categories",
        permissions: &[
            P::CategoriesView,
            P::CategoriesCreate,
            P::CategoriesUpdate,
            P::CategoriesDelete,
            P::CategoriesManage,
        ],
    },
    PermissionGroup {
        key: "collections",
        label: "Collections",
        permissions: &[
            P::CollectionsView,
            P::CollectionsCreate,
            P::CollectionsUpdate,
            P::CollectionsDelete,
            P::CollectionsManage,
        ],
    },
    PermissionGroup {
        key: "forms",
        label: "Forms",
        permissions: &[
            P::FormsView,
            P::FormsCreate,
            P::FormsUpdate,
            P::FormsDelete,
            P::FormsManage,
        ],
    },
    PermissionGroup {
        key: "placements",
        label: "Placements",
        permissions: &[
            P::PlacementsView,
            P::PlacementsCreate,
            P::PlacementsUpdate,
            P::PlacementsDelete,
            P::PlacementsManage,
        ],
    },
    PermissionGroup {
        key: "menus",
        label: "Menus",
        permissions: &[
            P::MenusView,
            P::MenusCreate,
            P::MenusUpdate,
            P::MenusDelete,
            P::MenusManage,
        ],
    },
    PermissionGroup {
        key: "analytics",
        label: "Analytics",
        permissions: &[P::AnalyticsView],
    },
    PermissionGroup {
        key: "settings",
        label: "Settings",
        permissions: &[P::SettingsView, P::SettingsUpdate, P::SettingsManage],
    },
];

/// Finds the group a permission is listed under.
pub fn permission_group(permission: Permission) -> Option<&'static PermissionGroup> {
    PERMISSION_GROUPS
        .iter()
        .find(|group| group.permissions.contains(&permission))
}

/// Finds a group by its key.
pub fn group_by_key(key: &str) -> Option<&'static PermissionGroup> {
    PERMISSION_GROUPS.iter().find(|group| group.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(Permission::ALL.len(), 59);
    }

    #[test]
    fn test_parse_round_trip_for_every_permission() {
        for perm in Permission::ALL {
            assert_eq!(perm.as_str().parse::<Permission>(), Ok(*perm));
        }
    }

    #[test]
    fn test_wire_string_is_resource_and_action() {
        assert_eq!(Permission::UsersAssignRole.as_str(), "users:assign-role");
        assert_eq!(Permission::UsersAssignRole.resource(), Resource::Users);
        assert_eq!(Permission::UsersAssignRole.action(), Action::AssignRole);
    }

    #[test]
    fn test_unknown_permission_is_rejected() {
        assert_eq!(
            "users:fly".parse::<Permission>(),
            Err(RbacError::UnknownPermission("users:fly".to_string()))
        );
        assert!(!is_known_permission(""));
        assert!(!is_known_permission("Users:View"));
        assert!(is_known_permission("users:view"));
    }

    #[test]
    fn test_manage_aliases() {
        assert!(Permission::ContentManage.is_manage_alias());
        assert!(!Permission::ContentDelete.is_manage_alias());
        assert_eq!(Resource::Settings.manage_alias(), Some(Permission::SettingsManage));
        assert_eq!(Resource::Profile.manage_alias(), None);
        assert_eq!(Resource::Dashboard.manage_alias(), None);
        assert_eq!(Resource::Analytics.manage_alias(), None);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("assign-role"), Some(Action::AssignRole));
        assert_eq!(Action::parse("publish"), None);
        assert_eq!(Action::parse("VIEW"), None);
    }

    #[test]
    fn test_serde_uses_wire_string() {
        let json = serde_json::to_string(&Permission::MenusUpdate).unwrap();
        assert_eq!(json, r#""menus:update""#);

        let parsed: Permission = serde_json::from_str(r#""forms:delete""#).unwrap();
        assert_eq!(parsed, Permission::FormsDelete);

        let err = serde_json::from_str::<Permission>(r#""forms:burn""#).unwrap_err();
        assert!(err.to_string().contains("unknown permission: forms:burn"));
    }

    #[test]
    fn test_permission_group_lookup() {
        assert_eq!(permission_group(Permission::UsersInvite).map(|g| g.key), Some("users"));
        assert_eq!(group_by_key("menus").map(|g| g.label), Some("Menus"));
        assert!(group_by_key("billing").is_none());
    }
}
