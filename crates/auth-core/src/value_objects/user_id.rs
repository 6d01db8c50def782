//! User ID - repository-assigned numeric identifier
//!
//! Zero (or any negative value) means "not yet assigned": the record has not
//! been persisted and must not be used to issue tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric user identifier assigned by the repository on creation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check whether the repository has assigned this ID
    #[inline]
    pub const fn is_assigned(&self) -> bool {
        self.0 > 0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, UserIdParseError> {
        s.trim()
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| UserIdParseError::InvalidFormat)
    }
}

/// Error when parsing a UserId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdParseError {
    #[error("invalid user id format")]
    InvalidFormat,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse(s)
    }
}
