//! Repository for family membership operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::FamilyMemberEntity;
use domain::models::FamilyRole;

/// Repository for family membership database operations.
#[derive(Clone)]
pub struct FamilyMemberRepository {
    pool: PgPool,
}

impl FamilyMemberRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a user's membership in a family.
    /// Returns None if the user is not a member.
    pub async fn get_membership(
        &self,
        family_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<FamilyMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, FamilyMemberEntity>(
            r#"
            SELECT id, family_id, user_id, role, created_at
            FROM family_members
            WHERE family_id = $1 AND user_id = $2
            "#,
        )
        .bind(family_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Adds a user to a family with the given role.
    pub async fn add_member(
        &self,
        family_id: Uuid,
        user_id: Uuid,
        role: FamilyRole,
    ) -> Result<FamilyMemberEntity, sqlx::Error> {
        sqlx::query_as::<_, FamilyMemberEntity>(
            r#"
            INSERT INTO family_members (family_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, family_id, user_id, role, created_at
            "#,
        )
        .bind(family_id)
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
    }
}
