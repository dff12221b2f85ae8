//! Family settings service.
//!
//! Orchestrates reads and writes of a family's settings record. Reads
//! lazily provision a default record for families that have never been
//! configured; writes go through a single atomic upsert.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use domain::models::{FamilySettings, FamilySettingsResponse, UpdateFamilySettingsRequest};
use persistence::entities::FamilySettingsEntity;
use persistence::repositories::FamilySettingsRepository;

/// Errors that can occur during settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid family id: {0}")]
    InvalidFamilyId(String),

    #[error("Unknown feature keys: {0}")]
    UnknownFeatureKeys(String),

    #[error("Unknown AI provider: {0}")]
    UnknownProvider(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::InvalidFamilyId(_)
            | SettingsError::UnknownFeatureKeys(_)
            | SettingsError::UnknownProvider(_) => ApiError::Validation(err.to_string()),
            SettingsError::Database(e) => e.into(),
        }
    }
}

/// Family settings service.
#[derive(Clone)]
pub struct FamilySettingsService {
    pool: PgPool,
}

impl FamilySettingsService {
    /// Creates a new service instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a family's settings, creating the default record on first read.
    ///
    /// Two concurrent first reads can both observe an absent record and race
    /// to insert the default. The unique constraint on `family_id` lets
    /// exactly one insert win; the loser re-fetches the row the winner
    /// created instead of failing the request.
    pub async fn get_settings(
        &self,
        family_id: &str,
    ) -> Result<FamilySettingsResponse, SettingsError> {
        let family_id = parse_family_id(family_id)?;
        let repo = FamilySettingsRepository::new(self.pool.clone());

        let entity = match repo.find_by_family_id(family_id).await? {
            Some(entity) => entity,
            None => match repo.create_default(family_id).await {
                Ok(entity) => entity,
                Err(err) if is_unique_violation(&err) => {
                    tracing::debug!(
                        family_id = %family_id,
                        "Lost default-settings insert race, re-fetching"
                    );
                    repo.find_by_family_id(family_id)
                        .await?
                        .ok_or(sqlx::Error::RowNotFound)?
                }
                Err(err) => {
                    tracing::error!(
                        family_id = %family_id,
                        "Failed to create default family settings: {}",
                        err
                    );
                    return Err(err.into());
                }
            },
        };

        Ok(to_response(entity))
    }

    /// Updates a family's settings through a single atomic upsert.
    ///
    /// Feature keys are checked against the closed enumeration again here,
    /// independently of request validation, so a caller that reaches the
    /// service through another path cannot store an unknown key. The AI
    /// block, when present, is stored exactly as provided.
    pub async fn update_settings(
        &self,
        family_id: &str,
        request: UpdateFamilySettingsRequest,
    ) -> Result<FamilySettingsResponse, SettingsError> {
        let family_id = parse_family_id(family_id)?;

        let enabled_features = request
            .feature_keys()
            .map_err(|unknown| SettingsError::UnknownFeatureKeys(unknown.join(", ")))?;

        let ai_settings = request
            .ai_settings
            .as_ref()
            .map(|ai| ai.to_settings())
            .transpose()
            .map_err(SettingsError::UnknownProvider)?;

        let repo = FamilySettingsRepository::new(self.pool.clone());
        let entity = repo
            .upsert(family_id, &enabled_features, ai_settings.as_ref())
            .await
            .map_err(|err| {
                tracing::error!(
                    family_id = %family_id,
                    "Failed to upsert family settings: {}",
                    err
                );
                err
            })?;

        tracing::info!(
            family_id = %family_id,
            feature_count = enabled_features.len(),
            ai_settings_updated = ai_settings.is_some(),
            "Family settings updated"
        );

        Ok(to_response(entity))
    }

    /// Creates the default settings record for a newly provisioned family.
    ///
    /// Unlike the lazy path inside [`get_settings`], this assumes the family
    /// has no record yet; calling it twice surfaces the uniqueness conflict
    /// to the caller.
    pub async fn create_default_settings(
        &self,
        family_id: &str,
    ) -> Result<FamilySettingsResponse, SettingsError> {
        let family_id = parse_family_id(family_id)?;
        let repo = FamilySettingsRepository::new(self.pool.clone());

        let entity = repo.create_default(family_id).await.map_err(|err| {
            tracing::error!(
                family_id = %family_id,
                "Failed to create default family settings: {}",
                err
            );
            err
        })?;

        Ok(to_response(entity))
    }
}

fn parse_family_id(raw: &str) -> Result<Uuid, SettingsError> {
    Uuid::parse_str(raw).map_err(|_| SettingsError::InvalidFamilyId(raw.to_string()))
}

fn to_response(entity: FamilySettingsEntity) -> FamilySettingsResponse {
    FamilySettings::from(entity).into()
}

/// Returns true for PostgreSQL unique-constraint violations (SQLSTATE 23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_parse_family_id_valid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_family_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_family_id_invalid() {
        match parse_family_id("family-one") {
            Err(SettingsError::InvalidFamilyId(raw)) => assert_eq!(raw, "family-one"),
            other => panic!("Expected InvalidFamilyId, got {:?}", other),
        }
    }

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let errors = [
            SettingsError::InvalidFamilyId("x".to_string()),
            SettingsError::UnknownFeatureKeys("bogus".to_string()),
            SettingsError::UnknownProvider("HAL9000".to_string()),
        ];
        for err in errors {
            let api_err: ApiError = err.into();
            let response = api_err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_database_error_maps_to_internal() {
        let err = SettingsError::Database(sqlx::Error::PoolTimedOut);
        let api_err: ApiError = err.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_feature_error_names_keys() {
        let err = SettingsError::UnknownFeatureKeys("bogus, nonsense".to_string());
        assert!(err.to_string().contains("bogus"));
        assert!(err.to_string().contains("nonsense"));
    }

    #[test]
    fn test_is_unique_violation_rejects_other_errors() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }
}
