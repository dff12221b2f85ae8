//! Domain models for Family Hub.

pub mod family;
pub mod family_settings;

pub use family::{FamilyMembership, FamilyRole};
pub use family_settings::{
    AiProvider, AiSettings, AiSettingsRequest, AiSettingsView, FamilySettings,
    FamilySettingsResponse, FeatureKey, UpdateFamilySettingsRequest, DEFAULT_AI_NAME,
};
