//! Domain layer for the Family Hub backend.
//!
//! This crate contains:
//! - Domain models (FamilySettings, FeatureKey, FamilyRole)
//! - Request/response DTOs and their validation rules

pub mod models;
