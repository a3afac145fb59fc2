use axum::{Json, extract::Path};
use tenantry_core::AppError;

use crate::docs::ErrorResponse;
use crate::validator::ValidatedJson;

use super::model::{RoleLevelResponse, RoleResponse, ValidateCustomRoleDto};
use super::service;

#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "Default roles, most privileged first", body = Vec<RoleResponse>)
    ),
    tag = "Roles"
)]
pub async fn get_roles() -> Json<Vec<RoleResponse>> {
    Json(service::list_roles())
}

#[utoipa::path(
    get,
    path = "/api/roles/{key}",
    params(
        ("key" = String, Path, description = "Role key")
    ),
    responses(
        (status = 200, description = "Role details", body = RoleResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    ),
    tag = "Roles"
)]
pub async fn get_role(Path(key): Path<String>) -> Result<Json<RoleResponse>, AppError> {
    let role = service::get_role(&key)?;
    Ok(Json(role))
}

#[utoipa::path(
    get,
    path = "/api/roles/{key}/level",
    params(
        ("key" = String, Path, description = "Role key")
    ),
    responses(
        (status = 200, description = "Hierarchy level, 0 for unknown roles", body = RoleLevelResponse)
    ),
    tag = "Roles"
)]
pub async fn get_role_level(Path(key): Path<String>) -> Json<RoleLevelResponse> {
    Json(service::get_level(&key))
}

#[utoipa::path(
    post,
    path = "/api/roles/validate",
    request_body = ValidateCustomRoleDto,
    responses(
        (status = 200, description = "Normalized custom role", body = RoleResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Role definition rejected", body = ErrorResponse)
    ),
    tag = "Roles"
)]
pub async fn validate_role(
    ValidatedJson(dto): ValidatedJson<ValidateCustomRoleDto>,
) -> Result<Json<RoleResponse>, AppError> {
    let role = service::validate_role(dto)?;
    Ok(Json(role))
}
