use tenantry_rbac::{
    AccessContext, ApiTokenGrant, Membership, can_assign_role, expand_permissions,
    filter_permissions_by_scopes, get_role_level, normalize_scopes, resolve_api_token,
    resolve_membership,
};
use tracing::{Span, debug};

use super::model::{
    AccessSource, AccessSubjectDto, CanAssignDto, CanAssignResponse, CheckAccessDto,
    CheckAccessResponse, CheckMode, EffectiveAccessResponse, ExpandPermissionsDto,
    FilterPermissionsDto, PermissionsResponse,
};

pub fn expand(dto: ExpandPermissionsDto) -> PermissionsResponse {
    PermissionsResponse {
        permissions: expand_permissions(&dto.permissions),
    }
}

pub fn filter(dto: FilterPermissionsDto) -> PermissionsResponse {
    PermissionsResponse {
        permissions: filter_permissions_by_scopes(&dto.permissions, &dto.scopes),
    }
}

fn resolve(subject: &AccessSubjectDto) -> (AccessSource, AccessContext) {
    Span::current().record("role", subject.role.as_str());

    match &subject.scopes {
        Some(scopes) => {
            let grant = ApiTokenGrant {
                role: subject.role.clone(),
                scopes: scopes.clone(),
            };
            (AccessSource::ApiToken, resolve_api_token(&grant))
        }
        None => {
            let mut membership = Membership::new(subject.role.clone());
            if let Some(permissions) = &subject.permissions {
                membership = membership.with_permissions(permissions.iter().cloned());
            }
            (AccessSource::Membership, resolve_membership(&membership))
        }
    }
}

pub fn effective(subject: AccessSubjectDto) -> EffectiveAccessResponse {
    let (source, context) = resolve(&subject);

    EffectiveAccessResponse {
        source,
        role: context.role,
        level: context.level,
        scopes: subject.scopes.as_ref().map(normalize_scopes),
        permissions: context.permissions.into_iter().collect(),
    }
}

pub fn check(dto: CheckAccessDto) -> CheckAccessResponse {
    let (source, context) = resolve(&dto.subject);
    let missing = context.missing_permissions(&dto.required);

    let allowed = match dto.mode {
        CheckMode::All => context.has_all_permissions(&dto.required),
        CheckMode::Any => context.has_any_permission(&dto.required),
    };
    Span::current().record("allowed", allowed);

    debug!(
        role = %context.role,
        source = ?source,
        mode = ?dto.mode,
        allowed,
        missing = missing.len(),
        "Access check evaluated"
    );

    CheckAccessResponse {
        allowed,
        mode: dto.mode,
        missing,
    }
}

pub fn can_assign(dto: CanAssignDto) -> CanAssignResponse {
    let allowed = can_assign_role(&dto.actor_role, &dto.target_role);
    Span::current()
        .record("role", dto.actor_role.as_str())
        .record("allowed", allowed);

    CanAssignResponse {
        allowed,
        actor_level: get_role_level(&dto.actor_role),
        target_level: get_role_level(&dto.target_role),
    }
}
