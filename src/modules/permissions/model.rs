use serde::{Deserialize, Serialize};
use tenantry_rbac::permissions::permission_group;
use tenantry_rbac::{Permission, PermissionGroup, implied_permissions};
use utoipa::{IntoParams, ToSchema};

/// A catalog permission with its place in the role editor and the
/// permissions it implies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionResponse {
    #[schema(example = "users:manage")]
    pub key: String,
    #[schema(example = "users")]
    pub resource: String,
    #[schema(example = "manage")]
    pub action: String,
    pub group: Option<String>,
    pub is_manage_alias: bool,
    pub implies: Vec<String>,
}

impl From<Permission> for PermissionResponse {
    fn from(permission: Permission) -> Self {
        Self {
            key: permission.as_str().to_string(),
            resource: permission.resource().as_str().to_string(),
            action: permission.action().as_str().to_string(),
            group: permission_group(permission).map(|group| group.key.to_string()),
            is_manage_alias: permission.is_manage_alias(),
            implies: implied_permissions(permission)
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionGroupResponse {
    #[schema(example = "content")]
    pub key: String,
    #[schema(example = "Content")]
    pub label: String,
    pub permissions: Vec<String>,
}

impl From<&PermissionGroup> for PermissionGroupResponse {
    fn from(group: &PermissionGroup) -> Self {
        Self {
            key: group.key.to_string(),
            label: group.label.to_string(),
            permissions: group
                .permissions
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PermissionFilterParams {
    /// Only permissions of this group
    pub group: Option<String>,
    /// Only permissions with this action, e.g. `manage`
    pub action: Option<String>,
}
