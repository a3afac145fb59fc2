use axum::{Json, extract::Query};
use tenantry_core::AppError;

use super::model::{PermissionFilterParams, PermissionGroupResponse, PermissionResponse};
use super::service;

#[utoipa::path(
    get,
    path = "/api/permissions",
    params(PermissionFilterParams),
    responses(
        (status = 200, description = "Catalog permissions", body = Vec<PermissionResponse>),
        (status = 400, description = "Unknown action", body = crate::docs::ErrorResponse),
        (status = 404, description = "Unknown group", body = crate::docs::ErrorResponse)
    ),
    tag = "Permissions"
)]
pub async fn get_permissions(
    Query(params): Query<PermissionFilterParams>,
) -> Result<Json<Vec<PermissionResponse>>, AppError> {
    let permissions = service::list_permissions(&params)?;
    Ok(Json(permissions))
}

#[utoipa::path(
    get,
    path = "/api/permissions/groups",
    responses(
        (status = 200, description = "Permission groups in role editor order", body = Vec<PermissionGroupResponse>)
    ),
    tag = "Permissions"
)]
pub async fn get_permission_groups() -> Json<Vec<PermissionGroupResponse>> {
    Json(service::list_groups())
}
