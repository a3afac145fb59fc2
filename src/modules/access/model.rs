use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExpandPermissionsDto {
    #[validate(length(max = 500, message = "At most 500 permissions per request"))]
    #[schema(example = json!(["users:manage"]))]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FilterPermissionsDto {
    #[validate(length(max = 500, message = "At most 500 permissions per request"))]
    #[schema(example = json!(["content:view", "content:manage", "content:delete"]))]
    pub permissions: Vec<String>,
    #[validate(length(max = 10, message = "At most 10 scopes per request"))]
    #[schema(example = json!(["write"]))]
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionsResponse {
    pub permissions: Vec<String>,
}

/// Who is asking: a session membership (optionally with stored
/// permissions) or an API token with scopes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_subject"))]
pub struct AccessSubjectDto {
    #[validate(length(min = 1, max = 50, message = "Role is required"))]
    #[schema(example = "editor")]
    pub role: String,
    /// Stored membership permissions overriding the role defaults
    #[validate(length(max = 500, message = "At most 500 permissions per request"))]
    pub permissions: Option<Vec<String>>,
    /// Token scopes; when present the subject is evaluated as an API token
    #[validate(length(max = 10, message = "At most 10 scopes per request"))]
    #[schema(example = json!(["read", "write"]))]
    pub scopes: Option<Vec<String>>,
}

fn validate_subject(subject: &AccessSubjectDto) -> Result<(), ValidationError> {
    if subject.permissions.is_some() && subject.scopes.is_some() {
        let mut err = ValidationError::new("subject");
        err.message =
            Some("A subject has either stored permissions or token scopes, not both".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    Membership,
    ApiToken,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EffectiveAccessResponse {
    pub source: AccessSource,
    pub role: String,
    pub level: u8,
    /// Normalized token scopes, for API-token subjects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Every required permission must be held
    #[default]
    All,
    /// One required permission is enough
    Any,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckAccessDto {
    #[validate(nested)]
    pub subject: AccessSubjectDto,
    #[validate(length(min = 1, max = 500, message = "At least one required permission"))]
    #[schema(example = json!(["content:update"]))]
    pub required: Vec<String>,
    #[serde(default)]
    pub mode: CheckMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckAccessResponse {
    pub allowed: bool,
    pub mode: CheckMode,
    /// Required permissions the subject does not hold
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CanAssignDto {
    #[validate(length(min = 1, max = 50, message = "Actor role is required"))]
    #[schema(example = "admin")]
    pub actor_role: String,
    #[validate(length(min = 1, max = 50, message = "Target role is required"))]
    #[schema(example = "editor")]
    pub target_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CanAssignResponse {
    pub allowed: bool,
    pub actor_level: u8,
    pub target_level: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(permissions: Option<&[&str]>, scopes: Option<&[&str]>) -> AccessSubjectDto {
        let to_vec =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        AccessSubjectDto {
            role: "editor".to_string(),
            permissions: permissions.map(to_vec),
            scopes: scopes.map(to_vec),
        }
    }

    #[test]
    fn test_subject_rejects_permissions_and_scopes() {
        assert!(subject(None, None).validate().is_ok());
        assert!(subject(Some(&["content:view"]), None).validate().is_ok());
        assert!(subject(None, Some(&["read"])).validate().is_ok());
        assert!(subject(Some(&["content:view"]), Some(&["read"])).validate().is_err());
    }

    #[test]
    fn test_subject_list_limits() {
        let mut dto = subject(None, None);
        dto.permissions = Some(vec!["content:view".to_string(); 501]);
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("permissions"));

        dto.permissions = Some(vec!["content:view".to_string(); 500]);
        assert!(dto.validate().is_ok());

        let mut dto = subject(None, None);
        dto.scopes = Some(vec!["read".to_string(); 11]);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_check_mode_defaults_to_all() {
        let dto: CheckAccessDto = serde_json::from_str(
            r#"{"subject":{"role":"viewer"},"required":["content:view"]}"#,
        )
        .unwrap();
        assert_eq!(dto.mode, CheckMode::All);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_check_requires_permissions() {
        let dto: CheckAccessDto =
            serde_json::from_str(r#"{"subject":{"role":"viewer"},"required":[],"mode":"any"}"#)
                .unwrap();
        assert!(dto.validate().is_err());
    }
}
