//! Family settings entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::{AiProvider, AiSettings, FamilySettings, FeatureKey};

/// Database row mapping for the family_settings table.
///
/// Feature keys and the provider are stored as text; narrowing to the domain
/// enums happens in the conversion below.
#[derive(Debug, Clone, FromRow)]
pub struct FamilySettingsEntity {
    pub id: Uuid,
    pub family_id: Uuid,
    pub enabled_features: Vec<String>,
    pub ai_api_endpoint: String,
    pub ai_api_secret: String,
    pub ai_model_name: String,
    pub ai_name: String,
    pub ai_provider: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FamilySettingsEntity> for FamilySettings {
    fn from(entity: FamilySettingsEntity) -> Self {
        // Rows only ever contain keys written through the validated paths;
        // anything unrecognized (e.g. a key retired by a migration) is dropped.
        let enabled_features = entity
            .enabled_features
            .iter()
            .filter_map(|raw| FeatureKey::from_str(raw).ok())
            .collect();

        Self {
            id: entity.id,
            family_id: entity.family_id,
            enabled_features,
            ai_settings: AiSettings {
                api_endpoint: entity.ai_api_endpoint,
                api_secret: entity.ai_api_secret,
                model_name: entity.ai_model_name,
                ai_name: entity.ai_name,
                provider: AiProvider::from_str(&entity.ai_provider).unwrap_or_default(),
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> FamilySettingsEntity {
        FamilySettingsEntity {
            id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            enabled_features: vec!["tasks".to_string(), "diary".to_string()],
            ai_api_endpoint: "http://localhost:11434".to_string(),
            ai_api_secret: "sk-stored".to_string(),
            ai_model_name: "llama3".to_string(),
            ai_name: "Jarvis".to_string(),
            ai_provider: "Ollama".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entity = entity();
        let family_id = entity.family_id;

        let settings: FamilySettings = entity.into();
        assert_eq!(settings.family_id, family_id);
        assert_eq!(
            settings.enabled_features,
            vec![FeatureKey::Tasks, FeatureKey::Diary]
        );
        assert_eq!(settings.ai_settings.api_secret, "sk-stored");
        assert_eq!(settings.ai_settings.provider, AiProvider::Ollama);
    }

    #[test]
    fn test_unknown_feature_keys_are_dropped() {
        let mut entity = entity();
        entity.enabled_features = vec!["tasks".to_string(), "telepathy".to_string()];

        let settings: FamilySettings = entity.into();
        assert_eq!(settings.enabled_features, vec![FeatureKey::Tasks]);
    }

    #[test]
    fn test_unknown_provider_falls_back_to_default() {
        let mut entity = entity();
        entity.ai_provider = "betamax".to_string();

        let settings: FamilySettings = entity.into();
        assert_eq!(settings.ai_settings.provider, AiProvider::OpenAi);
    }
}
