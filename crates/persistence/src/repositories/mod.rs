//! Repository implementations for database operations.

pub mod family_member;
pub mod family_settings;

pub use family_member::FamilyMemberRepository;
pub use family_settings::FamilySettingsRepository;
