//! Validation of tenant-defined roles.
//!
//! Tenants may define roles beyond the five system roles. A custom role sits
//! below the owner in the hierarchy and can never hand out more than the
//! person creating it already holds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{RbacError, Result};
use crate::implications::expand_permission_set;
use crate::permissions::Permission;
use crate::roles::{SystemRole, UNKNOWN_ROLE_LEVEL, get_role_level, role_by_key};

/// A role a tenant defines on top of the system roles. Levels stay below
/// the owner's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomRoleDefinition {
    #[validate(
        length(min = 2, max = 50, message = "Key must be between 2 and 50 characters"),
        custom(function = "validate_role_key")
    )]
    pub key: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 49, message = "Level must be between 1 and 49"))]
    pub level: u8,

    #[serde(default)]
    pub permissions: Vec<String>,
}

/// A validated custom role, ready to be stored against a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantRole {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub level: u8,
    pub permissions: Vec<Permission>,
    pub is_default: bool,
    pub is_system: bool,
}

/// Role keys start with a lowercase letter followed by lowercase letters,
/// digits, `_` or `-`.
fn validate_role_key(key: &str) -> std::result::Result<(), ValidationError> {
    let mut chars = key.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let rest_is_valid =
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

    if starts_with_letter && rest_is_valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("role_key");
        err.message = Some(
            "Key must start with a lowercase letter and contain only lowercase letters, digits, '_' or '-'"
                .into(),
        );
        Err(err)
    }
}

/// Validates `definition` on behalf of an actor holding `actor_role`.
///
/// Returns the normalized role with deduplicated permissions in catalog order.
pub fn validate_custom_role(
    definition: &CustomRoleDefinition,
    actor_role: &str,
) -> Result<TenantRole> {
    definition
        .validate()
        .map_err(|err| RbacError::Validation(err.to_string()))?;

    if SystemRole::from_key(&definition.key).is_some() {
        return Err(RbacError::ReservedRoleKey(definition.key.clone()));
    }

    let requested = definition
        .permissions
        .iter()
        .map(|p| p.parse::<Permission>())
        .collect::<Result<BTreeSet<Permission>>>()?;

    let actor_level = get_role_level(actor_role);
    let actor = match role_by_key(actor_role) {
        Some(role) if actor_level > UNKNOWN_ROLE_LEVEL => role,
        _ => return Err(RbacError::UnknownRole(actor_role.to_string())),
    };

    if definition.level > actor_level {
        return Err(RbacError::RoleLevelTooHigh {
            requested: definition.level,
            actor_level,
        });
    }

    let held = expand_permission_set(&actor.permissions.iter().copied().collect());
    let not_held: Vec<Permission> = requested.difference(&held).copied().collect();
    if !not_held.is_empty() {
        return Err(RbacError::PermissionNotHeld(not_held));
    }

    Ok(TenantRole {
        key: definition.key.clone(),
        name: definition.name.trim().to_string(),
        description: definition.description.clone(),
        level: definition.level,
        permissions: requested.into_iter().collect(),
        is_default: false,
        is_system: false,
    })
}
