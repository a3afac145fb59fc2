//! Manage-alias implication table and permission expansion.
//!
//! A `resource:manage` permission subsumes every other action on the same
//! resource. Expansion works in both directions: holding the alias grants the
//! fine-grained permissions, and holding every fine-grained permission infers
//! the alias.

use std::collections::BTreeSet;

use crate::permissions::Permission;

use Permission as P;

/// Every manage alias in the catalog.
pub const MANAGE_ALIASES: &[Permission] = &[
    P::UsersManage,
    P::RolesManage,
    P::TenantsManage,
    P::ContentManage,
    P::MediaManage,
    P::CategoriesManage,
    P::CollectionsManage,
    P::FormsManage,
    P::PlacementsManage,
    P::MenusManage,
    P::SettingsManage,
];

/// Returns the fine-grained permissions a manage alias subsumes, in catalog
/// order. Non-alias permissions imply nothing.
pub const fn implied_permissions(permission: Permission) -> &'static [Permission] {
    match permission {
        P::UsersManage => &[
            P::UsersView,
            P::UsersCreate,
            P::UsersUpdate,
            P::UsersDelete,
            P::UsersInvite,
            P::UsersAssignRole,
        ],
        P::RolesManage => &[P::RolesView, P::RolesCreate, P::RolesUpdate, P::RolesDelete],
        P::TenantsManage => &[
            P::TenantsView,
            P::TenantsCreate,
            P::TenantsUpdate,
            P::TenantsDelete,
        ],
        P::ContentManage => &[
            P::ContentView,
            P::ContentCreate,
            P::ContentUpdate,
            P::ContentDelete,
        ],
        P::MediaManage => &[P::MediaView, P::MediaCreate, P::MediaUpdate, P::MediaDelete],
        P::CategoriesManage => &[
            P::CategoriesView,
            P::CategoriesCreate,
            P::CategoriesUpdate,
            P::CategoriesDelete,
        ],
        P::CollectionsManage => &[
            P::CollectionsView,
            P::CollectionsCreate,
            P::CollectionsUpdate,
            P::CollectionsDelete,
        ],
        P::FormsManage => &[P::FormsView, P::FormsCreate, P::FormsUpdate, P::FormsDelete],
        P::PlacementsManage => &[
            P::PlacementsView,
            P::PlacementsCreate,
            P::PlacementsUpdate,
            P::PlacementsDelete,
        ],
        P::MenusManage => &[P::MenusView, P::MenusCreate, P::MenusUpdate, P::MenusDelete],
        P::SettingsManage => &[P::SettingsView, P::SettingsUpdate],
        // Fine-grained permissions imply nothing.
        P::DashboardView
        | P::UsersView
        | P::UsersCreate
        | P::UsersUpdate
        | P::UsersDelete
        | P::UsersInvite
        | P::UsersAssignRole
        | P::RolesView
        | P::RolesCreate
        | P::RolesUpdate
        | P::RolesDelete
        | P::ProfileView
        | P::ProfileUpdate
        | P::TenantsView
        | P::TenantsCreate
        | P::TenantsUpdate
        | P::TenantsDelete
        | P::ContentView
        | P::ContentCreate
        | P::ContentUpdate
        | P::ContentDelete
        | P::MediaView
        | P::MediaCreate
        | P::MediaUpdate
        | P::MediaDelete
        | P::CategoriesView
        | P::CategoriesCreate
        | P::CategoriesUpdate
        | P::CategoriesDelete
        | P::CollectionsView
        | P::CollectionsCreate
        | P::CollectionsUpdate
        | P::CollectionsDelete
        | P::FormsView
        | P::FormsCreate
        | P::FormsUpdate
        | P::FormsDelete
        | P::PlacementsView
        | P::PlacementsCreate
        | P::PlacementsUpdate
        | P::PlacementsDelete
        | P::MenusView
        | P::MenusCreate
        | P::MenusUpdate
        | P::MenusDelete
        | P::AnalyticsView
        | P::SettingsView
        | P::SettingsUpdate => &[],
    }
}

/// Expands a set of permission strings to its closure under the manage-alias
/// table.
///
/// Empty strings and duplicates are discarded. Strings that are not in the
/// catalog are passed through untouched; validating catalog membership is the
/// caller's job. The result is sorted so that equal sets compare equal.
///
/// ```
/// use tenantry_rbac::expand_permissions;
///
/// let expanded = expand_permissions(["settings:manage"]);
/// assert_eq!(
///     expanded,
///     vec!["settings:manage", "settings:update", "settings:view"]
/// );
/// ```
pub fn expand_permissions<I, S>(permissions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut working: BTreeSet<String> = permissions
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    // Downward: an alias grants everything it implies.
    for alias in MANAGE_ALIASES {
        if working.contains(alias.as_str()) {
            for implied in implied_permissions(*alias) {
                working.insert(implied.as_str().to_string());
            }
        }
    }

    // Upward: holding everything an alias implies infers the alias.
    for alias in MANAGE_ALIASES {
        if working.contains(alias.as_str()) {
            continue;
        }
        let complete = implied_permissions(*alias)
            .iter()
            .all(|implied| working.contains(implied.as_str()));
        if complete {
            working.insert(alias.as_str().to_string());
        }
    }

    working.into_iter().collect()
}

/// Typed counterpart of [`expand_permissions`] for callers that already hold
/// catalog permissions.
pub fn expand_permission_set(permissions: &BTreeSet<Permission>) -> BTreeSet<Permission> {
    let mut working = permissions.clone();

    for alias in MANAGE_ALIASES {
        if working.contains(alias) {
            working.extend(implied_permissions(*alias).iter().copied());
        }
    }

    for alias in MANAGE_ALIASES {
        if !working.contains(alias)
            && implied_permissions(*alias)
                .iter()
                .all(|implied| working.contains(implied))
        {
            working.insert(*alias);
        }
    }

    working
}
