//! Member role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles recognised by the booking core.
///
/// Account provisioning itself is an external concern; the core only needs
/// to distinguish ordinary members from administrators, because admins run
/// the admin surface but may not appear on a booking roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Ordinary member: can book rooms and join rosters.
    Member,
    /// Administrator: manages rooms, external bookings, and operating rules.
    Admin,
}

impl MemberRole {
    /// Check if this role is an administrator.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether a member with this role may appear on a booking roster.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Member)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = bookez_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            _ => Err(bookez_core::AppError::validation(format!(
                "Invalid member role: '{s}'. Expected one of: member, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admins_are_not_bookable() {
        assert!(MemberRole::Member.is_bookable());
        assert!(!MemberRole::Admin.is_bookable());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert_eq!("MEMBER".parse::<MemberRole>().unwrap(), MemberRole::Member);
        assert!("staff".parse::<MemberRole>().is_err());
    }
}
