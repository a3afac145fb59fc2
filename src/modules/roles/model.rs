use serde::{Deserialize, Serialize};
use tenantry_rbac::{CustomRoleDefinition, Role, TenantRole};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    #[schema(example = "editor")]
    pub key: String,
    #[schema(example = "Editor")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 30)]
    pub level: u8,
    pub permissions: Vec<String>,
    pub is_default: bool,
    pub is_system: bool,
}

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            key: role.key.clone(),
            name: role.name.clone(),
            description: Some(role.description.clone()),
            level: role.level,
            permissions: role
                .permissions
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            is_default: role.is_default,
            is_system: role.is_system,
        }
    }
}

impl From<TenantRole> for RoleResponse {
    fn from(role: TenantRole) -> Self {
        Self {
            key: role.key,
            name: role.name,
            description: role.description,
            level: role.level,
            permissions: role
                .permissions
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            is_default: role.is_default,
            is_system: role.is_system,
        }
    }
}

/// Level of a role key. Unknown keys report level 0.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleLevelResponse {
    #[schema(example = "author")]
    pub key: String,
    #[schema(example = 20)]
    pub level: u8,
}

/// A custom role as submitted by the role editor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomRoleDto {
    #[schema(example = "reviewer")]
    pub key: String,
    #[schema(example = "Reviewer")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 25)]
    pub level: u8,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl From<CustomRoleDto> for CustomRoleDefinition {
    fn from(dto: CustomRoleDto) -> Self {
        Self {
            key: dto.key,
            name: dto.name,
            description: dto.description,
            level: dto.level,
            permissions: dto.permissions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ValidateCustomRoleDto {
    /// Role of the member creating the custom role
    #[validate(length(min = 1, max = 50, message = "Actor role is required"))]
    #[schema(example = "editor")]
    pub actor_role: String,
    pub role: CustomRoleDto,
}
