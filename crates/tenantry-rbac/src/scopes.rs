//! API-token scopes and scope-based permission narrowing.
//!
//! Tokens carry coarse scopes (`read`, `write`, `delete`) instead of raw
//! permissions. [`filter_permissions_by_scopes`] narrows a permission list to
//! the actions those scopes authorize.
//!
//! # Action to scope mapping
//!
//! | Action | Required scope |
//! |--------|----------------|
//! | `view` | any scope |
//! | `create`, `update`, `invite`, `assign-role` | `write` |
//! | `delete` | `delete` |
//! | `manage` | `write` |
//! | anything else | `write` |
//!
//! `manage` only needs `write` even though the alias implies `delete` during
//! expansion. A write-scoped token therefore keeps `X:manage` but loses
//! `X:delete`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RbacError;
use crate::permissions::{Action, PERMISSION_DELIMITER};

/// A coarse capability granted to an API token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Read,
    Write,
    Delete,
}

impl Scope {
    pub const ALL: &'static [Scope] = &[Scope::Read, Scope::Write, Scope::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Read => "read",
            Scope::Write => "write",
            Scope::Delete => "delete",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Scope::Read),
            "write" => Ok(Scope::Write),
            "delete" => Ok(Scope::Delete),
            other => Err(RbacError::UnknownScope(other.to_string())),
        }
    }
}

/// A normalized, deduplicated set of scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<Scope>);

impl ScopeSet {
    /// Normalizes raw scope strings: trims, lower-cases, drops empty entries
    /// and deduplicates. Names outside the scope vocabulary grant nothing and
    /// are dropped.
    pub fn parse<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for raw in scopes {
            let normalized = raw.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            match normalized.parse::<Scope>() {
                Ok(scope) => {
                    set.insert(scope);
                }
                Err(_) => debug!(scope = %normalized, "Ignoring unknown token scope"),
            }
        }
        Self(set)
    }

    pub fn contains(&self, scope: Scope) -> bool {
        self.0.contains(&scope)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Scope> + '_ {
        self.0.iter().copied()
    }

    /// Returns `true` if this set satisfies the requirement.
    pub fn allows(&self, requirement: ScopeRequirement) -> bool {
        match requirement {
            ScopeRequirement::AnyScope => !self.is_empty(),
            ScopeRequirement::Scope(scope) => self.contains(scope),
        }
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<T: IntoIterator<Item = Scope>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Normalizes raw scope strings into their canonical wire form.
pub fn normalize_scopes<I, S>(scopes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ScopeSet::parse(scopes)
        .iter()
        .map(|scope| scope.as_str().to_string())
        .collect()
}

/// What a token must hold to keep a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRequirement {
    /// Satisfied by any granted scope.
    AnyScope,
    /// Satisfied only by this scope.
    Scope(Scope),
}

/// Classifies an action suffix (the text after the first `:`).
pub fn required_scope(action: &str) -> ScopeRequirement {
    match Action::parse(action) {
        Some(Action::View) => ScopeRequirement::AnyScope,
        Some(Action::Create | Action::Update | Action::Invite | Action::AssignRole) => {
            ScopeRequirement::Scope(Scope::Write)
        }
        Some(Action::Delete) => ScopeRequirement::Scope(Scope::Delete),
        Some(Action::Manage) => ScopeRequirement::Scope(Scope::Write),
        None => ScopeRequirement::Scope(Scope::Write),
    }
}

/// Classifies a full permission string by its action suffix. A string with
/// no delimiter has no recognizable action.
pub fn permission_scope_requirement(permission: &str) -> ScopeRequirement {
    match permission.split_once(PERMISSION_DELIMITER) {
        Some((_, action)) => required_scope(action),
        None => required_scope(""),
    }
}

/// Narrows `permissions` to those the given token scopes authorize.
///
/// An empty (or entirely unknown) scope list authorizes nothing. The output is
/// a sub-list of the input in the same relative order.
///
/// ```
/// use tenantry_rbac::filter_permissions_by_scopes;
///
/// let filtered = filter_permissions_by_scopes(
///     &["content:view", "content:manage", "content:delete"],
///     &["write"],
/// );
/// assert_eq!(filtered, vec!["content:view", "content:manage"]);
/// ```
pub fn filter_permissions_by_scopes<P, S>(permissions: &[P], scopes: &[S]) -> Vec<String>
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    let scopes = ScopeSet::parse(scopes);
    filter_permissions_by_scope_set(permissions, &scopes)
}

/// Same as [`filter_permissions_by_scopes`] with already-normalized scopes.
pub fn filter_permissions_by_scope_set<P>(permissions: &[P], scopes: &ScopeSet) -> Vec<String>
where
    P: AsRef<str>,
{
    if scopes.is_empty() {
        return Vec::new();
    }

    permissions
        .iter()
        .map(|permission| permission.as_ref())
        .filter(|permission| scopes.allows(permission_scope_requirement(permission)))
        .map(str::to_string)
        .collect()
}
