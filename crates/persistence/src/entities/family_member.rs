//! Family member entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::{FamilyMembership, FamilyRole};

/// Database row mapping for the family_members table.
#[derive(Debug, Clone, FromRow)]
pub struct FamilyMemberEntity {
    pub id: Uuid,
    pub family_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<FamilyMemberEntity> for FamilyMembership {
    fn from(entity: FamilyMemberEntity) -> Self {
        Self {
            id: entity.id,
            family_id: entity.family_id,
            user_id: entity.user_id,
            // An unparseable role must never grant elevated access.
            role: FamilyRole::from_str(&entity.role).unwrap_or(FamilyRole::Member),
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(role: &str) -> FamilyMemberEntity {
        FamilyMemberEntity {
            id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_domain_admin() {
        let membership: FamilyMembership = entity("admin").into();
        assert_eq!(membership.role, FamilyRole::Admin);
    }

    #[test]
    fn test_entity_to_domain_member() {
        let membership: FamilyMembership = entity("member").into();
        assert_eq!(membership.role, FamilyRole::Member);
    }

    #[test]
    fn test_unknown_role_demotes_to_member() {
        let membership: FamilyMembership = entity("superuser").into();
        assert_eq!(membership.role, FamilyRole::Member);
    }
}
