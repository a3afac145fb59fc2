use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::modules::access::model::{
    AccessSource, AccessSubjectDto, CanAssignDto, CanAssignResponse, CheckAccessDto,
    CheckAccessResponse, CheckMode, EffectiveAccessResponse, ExpandPermissionsDto,
    FilterPermissionsDto, PermissionsResponse,
};
use crate::modules::health::HealthResponse;
use crate::modules::permissions::model::{
    PermissionFilterParams, PermissionGroupResponse, PermissionResponse,
};
use crate::modules::roles::model::{
    CustomRoleDto, RoleLevelResponse, RoleResponse, ValidateCustomRoleDto,
};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Role 'ghost' not found")]
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::permissions::controller::get_permissions,
        crate::modules::permissions::controller::get_permission_groups,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::get_role,
        crate::modules::roles::controller::get_role_level,
        crate::modules::roles::controller::validate_role,
        crate::modules::access::controller::expand_permissions,
        crate::modules::access::controller::filter_permissions,
        crate::modules::access::controller::effective_access,
        crate::modules::access::controller::check_access,
        crate::modules::access::controller::can_assign,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            PermissionResponse,
            PermissionGroupResponse,
            PermissionFilterParams,
            RoleResponse,
            RoleLevelResponse,
            CustomRoleDto,
            ValidateCustomRoleDto,
            ExpandPermissionsDto,
            FilterPermissionsDto,
            PermissionsResponse,
            AccessSubjectDto,
            AccessSource,
            EffectiveAccessResponse,
            CheckMode,
            CheckAccessDto,
            CheckAccessResponse,
            CanAssignDto,
            CanAssignResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Permissions", description = "The permission catalog and its groups"),
        (name = "Roles", description = "Default roles, hierarchy levels and custom role validation"),
        (name = "Access", description = "Permission expansion, scope filtering and access decisions")
    ),
    info(
        title = "Tenantry RBAC API",
        version = "0.1.0",
        description = "Role-based access control decisions for multi-tenant CMS workspaces.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for path in [
            "/health",
            "/api/permissions",
            "/api/permissions/groups",
            "/api/roles",
            "/api/roles/{key}",
            "/api/roles/{key}/level",
            "/api/roles/validate",
            "/api/access/expand",
            "/api/access/filter",
            "/api/access/effective",
            "/api/access/check",
            "/api/access/can-assign",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing from {paths:?}");
        }
    }
}
