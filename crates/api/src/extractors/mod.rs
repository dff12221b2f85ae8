//! Axum request extractors.

pub mod json;
pub mod user_auth;

pub use json::Json;
pub use user_auth::UserAuth;
