//! Family settings domain models.
//!
//! Per-family feature toggles plus the AI-integration block. One settings
//! record exists per family; the stored AI secret is write-only and never
//! appears in any outward-facing view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Display name used for the assistant persona when a family has not
/// configured one.
pub const DEFAULT_AI_NAME: &str = "Jarvis";

/// An optional capability a family can enable or disable.
///
/// The vocabulary is closed: keys are defined here and nowhere else, and
/// both request validation and the settings service check against this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKey {
    Tasks,
    Rewards,
    Shopping,
    Recipes,
    Locations,
    Memories,
    Diary,
    Chat,
    Ai,
}

impl FeatureKey {
    /// Every feature key. New families start with all of them enabled.
    pub const ALL: [FeatureKey; 9] = [
        FeatureKey::Tasks,
        FeatureKey::Rewards,
        FeatureKey::Shopping,
        FeatureKey::Recipes,
        FeatureKey::Locations,
        FeatureKey::Memories,
        FeatureKey::Diary,
        FeatureKey::Chat,
        FeatureKey::Ai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::Tasks => "tasks",
            FeatureKey::Rewards => "rewards",
            FeatureKey::Shopping => "shopping",
            FeatureKey::Recipes => "recipes",
            FeatureKey::Locations => "locations",
            FeatureKey::Memories => "memories",
            FeatureKey::Diary => "diary",
            FeatureKey::Chat => "chat",
            FeatureKey::Ai => "ai",
        }
    }
}

impl FromStr for FeatureKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tasks" => Ok(FeatureKey::Tasks),
            "rewards" => Ok(FeatureKey::Rewards),
            "shopping" => Ok(FeatureKey::Shopping),
            "recipes" => Ok(FeatureKey::Recipes),
            "locations" => Ok(FeatureKey::Locations),
            "memories" => Ok(FeatureKey::Memories),
            "diary" => Ok(FeatureKey::Diary),
            "chat" => Ok(FeatureKey::Chat),
            "ai" => Ok(FeatureKey::Ai),
            _ => Err(format!("Invalid feature key: {}", s)),
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported inference backends for the family assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiProvider {
    #[serde(rename = "OpenAI")]
    OpenAi,
    Ollama,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "OpenAI",
            AiProvider::Ollama => "Ollama",
        }
    }
}

impl Default for AiProvider {
    fn default() -> Self {
        AiProvider::OpenAi
    }
}

impl FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(AiProvider::OpenAi),
            "ollama" => Ok(AiProvider::Ollama),
            _ => Err(format!("Invalid AI provider: {}", s)),
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The AI-integration block of a family's settings.
///
/// `api_secret` is stored as provided; encrypting it at rest is a pending
/// follow-up in the account-data hardening track.
/// TODO: encrypt api_secret at rest once the key-management story lands.
#[derive(Clone, PartialEq, Eq)]
pub struct AiSettings {
    pub api_endpoint: String,
    pub api_secret: String,
    pub model_name: String,
    pub ai_name: String,
    pub provider: AiProvider,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            api_secret: String::new(),
            model_name: String::new(),
            ai_name: DEFAULT_AI_NAME.to_string(),
            provider: AiProvider::default(),
        }
    }
}

// The secret must not leak through debug logging.
impl fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiSettings")
            .field("api_endpoint", &self.api_endpoint)
            .field("api_secret", &"[REDACTED]")
            .field("model_name", &self.model_name)
            .field("ai_name", &self.ai_name)
            .field("provider", &self.provider)
            .finish()
    }
}

/// Internal representation of a family's settings record.
#[derive(Debug, Clone)]
pub struct FamilySettings {
    pub id: Uuid,
    pub family_id: Uuid,
    pub enabled_features: Vec<FeatureKey>,
    pub ai_settings: AiSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outward-facing view of the AI settings (secret and provider withheld).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSettingsView {
    pub api_endpoint: String,
    pub model_name: String,
    pub ai_name: String,
}

/// Response DTO for both settings endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySettingsResponse {
    pub family_id: String,
    pub enabled_features: Vec<FeatureKey>,
    pub ai_settings: AiSettingsView,
}

impl From<FamilySettings> for FamilySettingsResponse {
    fn from(settings: FamilySettings) -> Self {
        // Field-by-field projection. The view struct has no secret field, so
        // the stored secret cannot reach a response on any path.
        Self {
            family_id: settings.family_id.to_string(),
            enabled_features: settings.enabled_features,
            ai_settings: AiSettingsView {
                api_endpoint: settings.ai_settings.api_endpoint,
                model_name: settings.ai_settings.model_name,
                ai_name: settings.ai_settings.ai_name,
            },
        }
    }
}

/// PUT request to update family settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFamilySettingsRequest {
    /// Feature keys to enable. Must be known keys without duplicates.
    #[validate(custom(function = "validate_enabled_features"))]
    pub enabled_features: Vec<String>,
    /// Optional AI configuration. All-or-nothing: when present, every field
    /// is required.
    #[validate(nested)]
    pub ai_settings: Option<AiSettingsRequest>,
}

/// AI configuration block of an update request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AiSettingsRequest {
    #[validate(
        length(min = 1, message = "aiSettings.apiEndpoint must not be empty"),
        url(message = "aiSettings.apiEndpoint must be a valid URL")
    )]
    pub api_endpoint: String,
    #[validate(length(min = 1, message = "aiSettings.apiSecret must not be empty"))]
    pub api_secret: String,
    #[validate(length(min = 1, message = "aiSettings.modelName must not be empty"))]
    pub model_name: String,
    #[validate(length(min = 1, message = "aiSettings.aiName must not be empty"))]
    pub ai_name: String,
    #[validate(custom(function = "validate_ai_provider"))]
    pub provider: String,
}

impl UpdateFamilySettingsRequest {
    /// Narrows the raw feature list to the closed enumeration.
    ///
    /// Duplicates collapse to their first occurrence. Any key outside the
    /// enumeration is collected and returned in the error list, so callers
    /// can name every offending key at once.
    pub fn feature_keys(&self) -> Result<Vec<FeatureKey>, Vec<String>> {
        let mut keys = Vec::new();
        let mut unknown = Vec::new();
        for raw in &self.enabled_features {
            match FeatureKey::from_str(raw) {
                Ok(key) if !keys.contains(&key) => keys.push(key),
                Ok(_) => {}
                Err(_) => unknown.push(raw.clone()),
            }
        }
        if unknown.is_empty() {
            Ok(keys)
        } else {
            Err(unknown)
        }
    }
}

impl AiSettingsRequest {
    /// Converts the validated request block into domain settings.
    ///
    /// The secret passes through unchanged; it is stored exactly as given.
    pub fn to_settings(&self) -> Result<AiSettings, String> {
        let provider = AiProvider::from_str(&self.provider)?;
        Ok(AiSettings {
            api_endpoint: self.api_endpoint.clone(),
            api_secret: self.api_secret.clone(),
            model_name: self.model_name.clone(),
            ai_name: self.ai_name.clone(),
            provider,
        })
    }
}

fn validate_enabled_features(features: &[String]) -> Result<(), ValidationError> {
    if features.len() > FeatureKey::ALL.len() {
        let mut err = ValidationError::new("too_many_features");
        err.message = Some(
            format!(
                "enabledFeatures cannot contain more than {} entries",
                FeatureKey::ALL.len()
            )
            .into(),
        );
        return Err(err);
    }

    let mut seen = HashSet::new();
    for raw in features {
        let key = FeatureKey::from_str(raw).map_err(|_| {
            let mut err = ValidationError::new("unknown_feature");
            err.message = Some(format!("Unknown feature key: {}", raw).into());
            err
        })?;
        if !seen.insert(key) {
            let mut err = ValidationError::new("duplicate_feature");
            err.message = Some(format!("Duplicate feature key: {}", raw).into());
            return Err(err);
        }
    }

    Ok(())
}

fn validate_ai_provider(provider: &str) -> Result<(), ValidationError> {
    AiProvider::from_str(provider).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("unknown_provider");
        err.message = Some(
            format!(
                "aiSettings.provider must be one of: {}, {}",
                AiProvider::OpenAi,
                AiProvider::Ollama
            )
            .into(),
        );
        err
    })
}
