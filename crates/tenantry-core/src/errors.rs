use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tenantry_rbac::RbacError;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    /// Maps an engine error onto the status a client should see.
    ///
    /// A rejected role definition is a 422, a failed hierarchy or permission
    /// check is a 403 and a broken catalog is a 500.
    pub fn rbac(err: RbacError) -> Self {
        let status = match &err {
            RbacError::UnknownPermission(_)
            | RbacError::UnknownScope(_)
            | RbacError::UnknownRole(_)
            | RbacError::ReservedRoleKey(_)
            | RbacError::RoleLevelTooHigh { .. }
            | RbacError::PermissionNotHeld(_)
            | RbacError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RbacError::InsufficientRole { .. } | RbacError::MissingPermission(_) => {
                StatusCode::FORBIDDEN
            }
            RbacError::CatalogInconsistent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tenantry_rbac::Permission;

    #[test]
    fn test_rbac_status_mapping() {
        assert_eq!(
            AppError::rbac(RbacError::ReservedRoleKey("owner".into())).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::rbac(RbacError::PermissionNotHeld(vec![Permission::TenantsDelete])).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::rbac(RbacError::MissingPermission("users:invite".into())).status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::rbac(RbacError::CatalogInconsistent(vec![])).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_defaults_to_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::forbidden(anyhow::anyhow!("nope")).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "nope");
    }
}
