//! Application services.
//!
//! Services contain the orchestration logic between route handlers and
//! repositories.

pub mod family_settings;

pub use family_settings::{FamilySettingsService, SettingsError};
