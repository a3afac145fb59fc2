mod common;

use axum::http::StatusCode;
use common::{get_json, strings};

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body) = get_json("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/access/filter"].is_object());
}

#[tokio::test]
async fn test_list_all_permissions() {
    let (status, body) = get_json("/api/permissions").await;

    assert_eq!(status, StatusCode::OK);
    let permissions = body.as_array().unwrap();
    assert_eq!(permissions.len(), 59);
    assert_eq!(permissions[0]["key"], "dashboard:view");
    assert_eq!(permissions[0]["resource"], "dashboard");
    assert_eq!(permissions[0]["group"], "dashboard");
}

#[tokio::test]
async fn test_manage_alias_lists_implications() {
    let (status, body) = get_json("/api/permissions?group=users&action=manage").await;

    assert_eq!(status, StatusCode::OK);
    let alias = &body[0];
    assert_eq!(alias["key"], "users:manage");
    assert_eq!(alias["is_manage_alias"], true);
    assert_eq!(
        strings(&alias["implies"]),
        vec![
            "users:view",
            "users:create",
            "users:update",
            "users:delete",
            "users:invite",
            "users:assign-role"
        ]
    );
}

#[tokio::test]
async fn test_unknown_group_returns_404() {
    let (status, body) = get_json("/api/permissions?group=billing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Permission group 'billing' not found");
}

#[tokio::test]
async fn test_unknown_action_returns_400() {
    let (status, _) = get_json("/api/permissions?action=publish").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_groups_cover_catalog() {
    let (status, body) = get_json("/api/permissions/groups").await;

    assert_eq!(status, StatusCode::OK);
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 14);

    let total: usize = groups
        .iter()
        .map(|group| group["permissions"].as_array().unwrap().len())
        .sum();
    assert_eq!(total, 59);
}
