//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod family_member;
pub mod family_settings;

pub use family_member::FamilyMemberEntity;
pub use family_settings::FamilySettingsEntity;
