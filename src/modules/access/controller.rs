use axum::Json;
use tenantry_core::AppError;

use crate::docs::ErrorResponse;
use crate::validator::ValidatedJson;

use super::model::{
    AccessSubjectDto, CanAssignDto, CanAssignResponse, CheckAccessDto, CheckAccessResponse,
    EffectiveAccessResponse, ExpandPermissionsDto, FilterPermissionsDto, PermissionsResponse,
};
use super::service;

#[utoipa::path(
    post,
    path = "/api/access/expand",
    request_body = ExpandPermissionsDto,
    responses(
        (status = 200, description = "Permissions closed under the manage aliases", body = PermissionsResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Access"
)]
pub async fn expand_permissions(
    ValidatedJson(dto): ValidatedJson<ExpandPermissionsDto>,
) -> Result<Json<PermissionsResponse>, AppError> {
    Ok(Json(service::expand(dto)))
}

#[utoipa::path(
    post,
    path = "/api/access/filter",
    request_body = FilterPermissionsDto,
    responses(
        (status = 200, description = "Permissions the scopes authorize, in input order", body = PermissionsResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Access"
)]
pub async fn filter_permissions(
    ValidatedJson(dto): ValidatedJson<FilterPermissionsDto>,
) -> Result<Json<PermissionsResponse>, AppError> {
    Ok(Json(service::filter(dto)))
}

#[utoipa::path(
    post,
    path = "/api/access/effective",
    request_body = AccessSubjectDto,
    responses(
        (status = 200, description = "Effective permissions of the subject", body = EffectiveAccessResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Access"
)]
pub async fn effective_access(
    ValidatedJson(dto): ValidatedJson<AccessSubjectDto>,
) -> Result<Json<EffectiveAccessResponse>, AppError> {
    Ok(Json(service::effective(dto)))
}

#[utoipa::path(
    post,
    path = "/api/access/check",
    request_body = CheckAccessDto,
    responses(
        (status = 200, description = "Whether the subject holds the required permissions", body = CheckAccessResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Access"
)]
pub async fn check_access(
    ValidatedJson(dto): ValidatedJson<CheckAccessDto>,
) -> Result<Json<CheckAccessResponse>, AppError> {
    Ok(Json(service::check(dto)))
}

#[utoipa::path(
    post,
    path = "/api/access/can-assign",
    request_body = CanAssignDto,
    responses(
        (status = 200, description = "Whether the actor may assign the target role", body = CanAssignResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Access"
)]
pub async fn can_assign(
    ValidatedJson(dto): ValidatedJson<CanAssignDto>,
) -> Result<Json<CanAssignResponse>, AppError> {
    Ok(Json(service::can_assign(dto)))
}
