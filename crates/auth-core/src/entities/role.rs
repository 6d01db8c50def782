//! Role entity - the closed set of account roles and their hierarchy
//!
//! Roles are totally ordered by [`Role::level`], but the manage relation is
//! narrower than "higher level wins":
//!
//! | actor         | may manage                               |
//! |---------------|------------------------------------------|
//! | `super_admin` | `user`, `moderator`, `admin`, `super_admin` |
//! | `admin`       | `user`, `moderator`                      |
//! | `moderator`   | nothing                                  |
//! | `user`        | nothing                                  |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Account role
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular account
    #[default]
    User,
    /// Community moderator
    Moderator,
    /// Pool administrator
    Admin,
    /// Highest privilege, able to manage every role
    SuperAdmin,
}

impl Role {
    /// Every role, lowest level first
    pub const ALL: [Role; 4] = [Role::User, Role::Moderator, Role::Admin, Role::SuperAdmin];

    /// Permission level (1..=4, higher = more permissions)
    #[inline]
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::User => 1,
            Self::Moderator => 2,
            Self::Admin => 3,
            Self::SuperAdmin => 4,
        }
    }

    /// Check if this role can manage (promote/demote) the target role
    #[must_use]
    pub const fn can_manage(self, target: Role) -> bool {
        match self {
            Self::SuperAdmin => true,
            Self::Admin => matches!(target, Self::User | Self::Moderator),
            Self::Moderator | Self::User => false,
        }
    }

    /// Check if this role sits at or above another role's level
    #[inline]
    #[must_use]
    pub const fn is_at_least(self, other: Role) -> bool {
        self.level() >= other.level()
    }

    /// Storage and wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
