use anyhow::anyhow;
use tenantry_core::AppError;
use tenantry_rbac::{default_roles, get_role_level, role_by_key, validate_custom_role};
use tracing::{Span, info};

use super::model::{RoleLevelResponse, RoleResponse, ValidateCustomRoleDto};

pub fn list_roles() -> Vec<RoleResponse> {
    default_roles().iter().map(RoleResponse::from).collect()
}

pub fn get_role(key: &str) -> Result<RoleResponse, AppError> {
    role_by_key(key)
        .map(RoleResponse::from)
        .ok_or_else(|| AppError::not_found(anyhow!("Role '{}' not found", key)))
}

pub fn get_level(key: &str) -> RoleLevelResponse {
    RoleLevelResponse {
        key: key.to_string(),
        level: get_role_level(key),
    }
}

pub fn validate_role(dto: ValidateCustomRoleDto) -> Result<RoleResponse, AppError> {
    let actor_role = dto.actor_role;
    let span = Span::current();
    span.record("role", actor_role.as_str());

    let result = validate_custom_role(&dto.role.into(), &actor_role);
    span.record("allowed", result.is_ok());
    let role = result.map_err(AppError::rbac)?;

    info!(
        actor_role = %actor_role,
        role = %role.key,
        level = role.level,
        permissions = role.permissions.len(),
        "Custom role accepted"
    );

    Ok(role.into())
}
