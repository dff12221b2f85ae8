//! Family-scoped authorization.
//!
//! Every family route passes through [`authorize_family_role`]: it resolves
//! the caller's membership in the family named by the path and checks the
//! caller's role against an allow-list. Handlers receive the resolved
//! [`FamilyAccess`] and never look at raw membership rows themselves.

use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::user_auth::UserAuth;
use domain::models::{FamilyMembership, FamilyRole};
use persistence::repositories::FamilyMemberRepository;

/// Resolved family access for the current request.
#[derive(Debug, Clone)]
pub struct FamilyAccess {
    /// The family ID.
    pub family_id: Uuid,
    /// The caller's role in the family.
    pub role: FamilyRole,
    /// The membership ID.
    pub membership_id: Uuid,
}

/// Checks that the authenticated caller holds one of the allowed roles in the
/// family identified by `family_id` (the raw path segment).
///
/// Fails with:
/// - 400 when the family ID is not a valid UUID
/// - 404 when the caller is not a member (membership absence is not
///   distinguishable from an unknown family on purpose)
/// - 403 when the caller's role is not in the allow-list
pub async fn authorize_family_role(
    state: &AppState,
    user: &UserAuth,
    family_id: &str,
    allowed: &[FamilyRole],
) -> Result<FamilyAccess, ApiError> {
    let family_id = Uuid::parse_str(family_id)
        .map_err(|_| ApiError::Validation(format!("Invalid family id: {}", family_id)))?;

    let repo = FamilyMemberRepository::new(state.pool.clone());
    let membership: FamilyMembership = repo
        .get_membership(family_id, user.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?
        .into();

    if !allowed.contains(&membership.role) {
        return Err(ApiError::Forbidden(format!(
            "Insufficient permissions. Allowed roles: {}",
            role_list(allowed)
        )));
    }

    Ok(FamilyAccess {
        family_id,
        role: membership.role,
        membership_id: membership.id,
    })
}

fn role_list(roles: &[FamilyRole]) -> String {
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
