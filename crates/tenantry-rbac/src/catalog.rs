//! Start-up self-check of the static catalog.
//!
//! The catalog, groups, implication table and role registry are hand-written
//! tables. A reference that does not line up with the catalog is a
//! programming error, so every binary runs [`ensure_catalog`] before serving
//! anything and refuses to start if it fails.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, error};

use crate::error::{RbacError, Result};
use crate::implications::{MANAGE_ALIASES, implied_permissions};
use crate::permissions::{Action, PERMISSION_GROUPS, Permission, Resource};
use crate::roles::{SystemRole, default_roles};

/// Counts reported by a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub permissions: usize,
    pub groups: usize,
    pub manage_aliases: usize,
    pub roles: usize,
}

static CATALOG_CHECK: OnceLock<std::result::Result<CatalogSummary, RbacError>> = OnceLock::new();

/// Runs [`verify_catalog`] once per process and returns the cached outcome.
pub fn ensure_catalog() -> Result<CatalogSummary> {
    CATALOG_CHECK
        .get_or_init(|| {
            let outcome = verify_catalog();
            match &outcome {
                Ok(summary) => debug!(?summary, "Permission catalog verified"),
                Err(err) => error!(%err, "Permission catalog failed verification"),
            }
            outcome
        })
        .clone()
}

/// Checks every cross-reference between the catalog, the groups, the
/// implication table and the role registry. All violations are collected
/// before returning.
pub fn verify_catalog() -> Result<CatalogSummary> {
    let mut violations = Vec::new();

    check_permissions(&mut violations);
    check_groups(&mut violations);
    check_implications(&mut violations);
    check_roles(&mut violations);

    if !violations.is_empty() {
        return Err(RbacError::CatalogInconsistent(violations));
    }

    Ok(CatalogSummary {
        permissions: Permission::ALL.len(),
        groups: PERMISSION_GROUPS.len(),
        manage_aliases: MANAGE_ALIASES.len(),
        roles: default_roles().len(),
    })
}

fn check_permissions(violations: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for permission in Permission::ALL {
        let wire = permission.as_str();
        if !seen.insert(wire) {
            violations.push(format!("duplicate permission string '{wire}'"));
        }

        let expected = format!("{}:{}", permission.resource(), permission.action());
        if wire != expected {
            violations.push(format!(
                "permission '{wire}' does not match its resource and action '{expected}'"
            ));
        }

        if wire.parse::<Permission>().ok() != Some(*permission) {
            violations.push(format!("permission '{wire}' does not parse back to itself"));
        }
    }
}

fn check_groups(violations: &mut Vec<String>) {
    let mut membership: HashMap<Permission, usize> = HashMap::new();
    let mut keys = HashSet::new();

    for group in PERMISSION_GROUPS {
        if !keys.insert(group.key) {
            violations.push(format!("duplicate permission group '{}'", group.key));
        }
        for permission in group.permissions {
            *membership.entry(*permission).or_default() += 1;
            if permission.resource().as_str() != group.key {
                violations.push(format!(
                    "permission '{permission}' is listed under group '{}'",
                    group.key
                ));
            }
        }
    }

    for permission in Permission::ALL {
        match membership.get(permission).copied().unwrap_or(0) {
            1 => {}
            0 => violations.push(format!("permission '{permission}' belongs to no group")),
            n => violations.push(format!("permission '{permission}' belongs to {n} groups")),
        }
    }
}

fn check_implications(violations: &mut Vec<String>) {
    let aliases: BTreeSet<Permission> = MANAGE_ALIASES.iter().copied().collect();
    if aliases.len() != MANAGE_ALIASES.len() {
        violations.push("duplicate entries in the manage alias list".to_string());
    }

    for permission in Permission::ALL {
        let listed = aliases.contains(permission);
        if permission.is_manage_alias() != listed {
            violations.push(format!(
                "permission '{permission}' is_manage_alias={} but alias list membership={listed}",
                permission.is_manage_alias()
            ));
        }
        if !permission.is_manage_alias() && !implied_permissions(*permission).is_empty() {
            violations.push(format!("non-alias permission '{permission}' implies permissions"));
        }
    }

    for alias in MANAGE_ALIASES {
        let implied = implied_permissions(*alias);
        for permission in implied {
            if !Permission::ALL.contains(permission) {
                violations.push(format!(
                    "'{alias}' implies '{permission}' which is not in the catalog"
                ));
            }
            if permission.resource() != alias.resource() {
                violations.push(format!("'{alias}' implies '{permission}' on another resource"));
            }
            if permission.is_manage_alias() {
                violations.push(format!("'{alias}' implies another manage alias '{permission}'"));
            }
        }

        let expected: BTreeSet<Permission> = alias
            .resource()
            .permissions()
            .filter(|p| p.action() != Action::Manage)
            .collect();
        let actual: BTreeSet<Permission> = implied.iter().copied().collect();
        if expected != actual {
            violations.push(format!(
                "'{alias}' does not imply exactly the other actions on '{}'",
                alias.resource()
            ));
        }
    }

    for resource in Resource::ALL {
        let alias_count = resource
            .permissions()
            .filter(|p| p.is_manage_alias())
            .count();
        if alias_count > 1 {
            violations.push(format!("resource '{resource}' has {alias_count} manage aliases"));
        }
    }
}

fn check_roles(violations: &mut Vec<String>) {
    let roles = default_roles();
    let mut keys = HashSet::new();
    let mut previous_level: Option<u8> = None;

    for role in roles {
        if !keys.insert(role.key.as_str()) {
            violations.push(format!("duplicate role key '{}'", role.key));
        }

        match SystemRole::from_key(&role.key) {
            Some(system) if system.level() == role.level => {}
            Some(system) => violations.push(format!(
                "role '{}' has level {} but the level map says {}",
                role.key,
                role.level,
                system.level()
            )),
            None => violations.push(format!("role '{}' is not a system role key", role.key)),
        }

        if let Some(previous) = previous_level {
            if role.level >= previous {
                violations.push(format!(
                    "role '{}' (level {}) is not below the previous role (level {previous})",
                    role.key, role.level
                ));
            }
        }
        previous_level = Some(role.level);

        let mut unique = HashSet::new();
        for permission in &role.permissions {
            if !Permission::ALL.contains(permission) {
                violations.push(format!(
                    "role '{}' references '{permission}' which is not in the catalog",
                    role.key
                ));
            }
            if !unique.insert(*permission) {
                violations.push(format!("role '{}' lists '{permission}' twice", role.key));
            }
        }
    }

    let owner: BTreeSet<Permission> =
        SystemRole::Owner.role().permissions.iter().copied().collect();
    let catalog: BTreeSet<Permission> = Permission::ALL.iter().copied().collect();
    if owner != catalog {
        let missing: Vec<&str> = catalog.difference(&owner).map(|p| p.as_str()).collect();
        violations.push(format!("owner role is missing {}", missing.join(", ")));
    }

    if roles.len() != SystemRole::ALL.len() {
        violations.push(format!(
            "registry holds {} roles but {} system roles are defined",
            roles.len(),
            SystemRole::ALL.len()
        ));
    }
}
