//! Family settings API routes.
//!
//! Feature toggles and the AI-integration block for a family. Reading is
//! open to every family member; writing requires the admin role. The AI
//! secret is accepted on writes but never included in responses.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{Json, UserAuth};
use crate::middleware::authorize_family_role;
use crate::services::FamilySettingsService;
use domain::models::{FamilyRole, UpdateFamilySettingsRequest};

/// GET /api/v1/families/:family_id/settings
///
/// Get family settings, provisioning the defaults on first read.
/// Any family member may read settings.
pub async fn get_family_settings(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let access =
        authorize_family_role(&state, &user_auth, &family_id, &FamilyRole::ALL).await?;

    let service = FamilySettingsService::new(state.pool.clone());
    let settings = service.get_settings(&family_id).await?;

    info!(
        family_id = %access.family_id,
        user_id = %user_auth.user_id,
        "Fetched family settings"
    );

    Ok(Json(settings))
}

/// PUT /api/v1/families/:family_id/settings
///
/// Update family settings. Only family admins can write.
pub async fn update_family_settings(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<String>,
    Json(request): Json<UpdateFamilySettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let access =
        authorize_family_role(&state, &user_auth, &family_id, &[FamilyRole::Admin]).await?;

    // Validate before any persistence work runs
    request.validate()?;

    let service = FamilySettingsService::new(state.pool.clone());
    let settings = service.update_settings(&family_id, request).await?;

    info!(
        family_id = %access.family_id,
        user_id = %user_auth.user_id,
        "Updated family settings"
    );

    Ok(Json(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_minimal() {
        let json = r#"{"enabledFeatures": ["tasks", "rewards"]}"#;
        let request: UpdateFamilySettingsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.enabled_features.len(), 2);
        assert!(request.ai_settings.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_with_ai_settings() {
        let json = r#"{
            "enabledFeatures": ["tasks"],
            "aiSettings": {
                "apiEndpoint": "http://localhost:11434",
                "apiSecret": "sk-local",
                "modelName": "llama3",
                "aiName": "Jarvis",
                "provider": "Ollama"
            }
        }"#;
        let request: UpdateFamilySettingsRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.ai_settings.unwrap().model_name, "llama3");
    }

    #[test]
    fn test_update_request_duplicate_features_fail_validation() {
        let json = r#"{"enabledFeatures": ["tasks", "tasks"]}"#;
        let request: UpdateFamilySettingsRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }
}
