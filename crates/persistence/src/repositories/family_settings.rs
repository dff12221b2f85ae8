//! Repository for family settings operations.
//!
//! Sole owner of the persistence semantics for the one-row-per-family
//! settings table. The unique index on `family_id` backs both the upsert and
//! the lazy default-creation path; the migrations that create it run at
//! process start and startup aborts if they fail.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::FamilySettingsEntity;
use domain::models::{AiSettings, FeatureKey};

/// Repository for family settings database operations.
#[derive(Clone)]
pub struct FamilySettingsRepository {
    pool: PgPool,
}

impl FamilySettingsRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets settings for a family.
    /// Returns None if settings don't exist yet.
    pub async fn find_by_family_id(
        &self,
        family_id: Uuid,
    ) -> Result<Option<FamilySettingsEntity>, sqlx::Error> {
        sqlx::query_as::<_, FamilySettingsEntity>(
            r#"
            SELECT id, family_id, enabled_features, ai_api_endpoint, ai_api_secret,
                   ai_model_name, ai_name, ai_provider, created_at, updated_at
            FROM family_settings
            WHERE family_id = $1
            "#,
        )
        .bind(family_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Creates default settings for a family: every feature enabled, AI block
    /// from column defaults.
    ///
    /// Not idempotent. Callers must have confirmed the row is absent; a second
    /// insert for the same family surfaces the unique-constraint violation
    /// unchanged so the caller can decide how to recover.
    pub async fn create_default(
        &self,
        family_id: Uuid,
    ) -> Result<FamilySettingsEntity, sqlx::Error> {
        sqlx::query_as::<_, FamilySettingsEntity>(
            r#"
            INSERT INTO family_settings (family_id)
            VALUES ($1)
            RETURNING id, family_id, enabled_features, ai_api_endpoint, ai_api_secret,
                      ai_model_name, ai_name, ai_provider, created_at, updated_at
            "#,
        )
        .bind(family_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Updates family settings.
    ///
    /// Single atomic upsert: updates the row if it exists, inserts one
    /// otherwise. When `ai_settings` is None the AI columns keep their stored
    /// values on the update arm and fall back to the column defaults on the
    /// insert arm.
    pub async fn upsert(
        &self,
        family_id: Uuid,
        enabled_features: &[FeatureKey],
        ai_settings: Option<&AiSettings>,
    ) -> Result<FamilySettingsEntity, sqlx::Error> {
        let features: Vec<String> = enabled_features
            .iter()
            .map(|key| key.as_str().to_string())
            .collect();

        sqlx::query_as::<_, FamilySettingsEntity>(
            r#"
            INSERT INTO family_settings (
                family_id, enabled_features, ai_api_endpoint, ai_api_secret,
                ai_model_name, ai_name, ai_provider
            )
            VALUES (
                $1, $2,
                COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''),
                COALESCE($6, 'Jarvis'), COALESCE($7, 'OpenAI')
            )
            ON CONFLICT (family_id) DO UPDATE SET
                enabled_features = EXCLUDED.enabled_features,
                ai_api_endpoint = COALESCE($3, family_settings.ai_api_endpoint),
                ai_api_secret = COALESCE($4, family_settings.ai_api_secret),
                ai_model_name = COALESCE($5, family_settings.ai_model_name),
                ai_name = COALESCE($6, family_settings.ai_name),
                ai_provider = COALESCE($7, family_settings.ai_provider),
                updated_at = NOW()
            RETURNING id, family_id, enabled_features, ai_api_endpoint, ai_api_secret,
                      ai_model_name, ai_name, ai_provider, created_at, updated_at
            "#,
        )
        .bind(family_id)
        .bind(features)
        .bind(ai_settings.map(|ai| ai.api_endpoint.as_str()))
        .bind(ai_settings.map(|ai| ai.api_secret.as_str()))
        .bind(ai_settings.map(|ai| ai.model_name.as_str()))
        .bind(ai_settings.map(|ai| ai.ai_name.as_str()))
        .bind(ai_settings.map(|ai| ai.provider.as_str()))
        .fetch_one(&self.pool)
        .await
    }

    /// Deletes settings for a family.
    /// Returns whether a row was removed.
    pub async fn delete(&self, family_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM family_settings
            WHERE family_id = $1
            "#,
        )
        .bind(family_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    // Persistence behavior (upsert arms, the non-idempotent create_default,
    // delete) is covered by the integration tests in crates/api/tests, which
    // run against a real PostgreSQL instance.
}
