use anyhow::anyhow;
use tenantry_core::AppError;
use tenantry_rbac::permissions::{Action, group_by_key};
use tenantry_rbac::{PERMISSION_GROUPS, Permission};

use super::model::{PermissionFilterParams, PermissionGroupResponse, PermissionResponse};

pub fn list_permissions(
    params: &PermissionFilterParams,
) -> Result<Vec<PermissionResponse>, AppError> {
    let group = match params.group.as_deref() {
        Some(key) => Some(
            group_by_key(key).ok_or_else(|| {
                AppError::not_found(anyhow!("Permission group '{}' not found", key))
            })?,
        ),
        None => None,
    };

    let action = match params.action.as_deref() {
        Some(name) => Some(
            Action::parse(name)
                .ok_or_else(|| AppError::bad_request(anyhow!("Unknown action '{}'", name)))?,
        ),
        None => None,
    };

    Ok(Permission::ALL
        .iter()
        .copied()
        .filter(|p| group.is_none_or(|g| g.permissions.contains(p)))
        .filter(|p| action.is_none_or(|a| p.action() == a))
        .map(PermissionResponse::from)
        .collect())
}

pub fn list_groups() -> Vec<PermissionGroupResponse> {
    PERMISSION_GROUPS.iter().map(PermissionGroupResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_all_permissions() {
        let all = list_permissions(&PermissionFilterParams::default()).unwrap();
        assert_eq!(all.len(), 59);
    }

    #[test]
    fn test_filter_by_group_and_action() {
        let params = PermissionFilterParams {
            group: Some("media".to_string()),
            action: Some("manage".to_string()),
        };
        let filtered = list_permissions(&params).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].key, "media:manage");
        assert!(filtered[0].is_manage_alias);
        assert_eq!(filtered[0].implies.len(), 4);
    }

    #[test]
    fn test_unknown_group_is_not_found() {
        let params = PermissionFilterParams {
            group: Some("billing".to_string()),
            action: None,
        };
        let err = list_permissions(&params).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }
}
