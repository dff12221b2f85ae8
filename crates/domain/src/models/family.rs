//! Family membership domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyRole {
    Admin,
    Member,
}

impl FamilyRole {
    /// Every role, in privilege order.
    pub const ALL: [FamilyRole; 2] = [FamilyRole::Admin, FamilyRole::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyRole::Admin => "admin",
            FamilyRole::Member => "member",
        }
    }

    /// Returns true if this role can change family settings
    pub fn can_manage_settings(&self) -> bool {
        matches!(self, FamilyRole::Admin)
    }
}

impl FromStr for FamilyRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(FamilyRole::Admin),
            "member" => Ok(FamilyRole::Member),
            _ => Err(format!("Invalid family role: {}", s)),
        }
    }
}

impl fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's membership in a family.
#[derive(Debug, Clone)]
pub struct FamilyMembership {
    pub id: Uuid,
    pub family_id: Uuid,
    pub user_id: Uuid,
    pub role: FamilyRole,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in FamilyRole::ALL {
            assert_eq!(FamilyRole::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_role_from_str_case_insensitive() {
        assert_eq!(FamilyRole::from_str("Admin").unwrap(), FamilyRole::Admin);
        assert_eq!(FamilyRole::from_str("MEMBER").unwrap(), FamilyRole::Member);
    }

    #[test]
    fn test_role_from_str_invalid() {
        assert!(FamilyRole::from_str("owner").is_err());
        assert!(FamilyRole::from_str("").is_err());
    }

    #[test]
    fn test_role_permissions() {
        assert!(FamilyRole::Admin.can_manage_settings());
        assert!(!FamilyRole::Member.can_manage_settings());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(FamilyRole::Admin.to_string(), "admin");
        assert_eq!(FamilyRole::Member.to_string(), "member");
    }
}
