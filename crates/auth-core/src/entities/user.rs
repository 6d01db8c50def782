//! User entity - represents a pool account

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::entities::Role;
use crate::error::DomainError;
use crate::value_objects::UserId;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid regex")
});

/// Check an email address against the accepted format
///
/// Accepts the common `local@domain.tld` shape and rejects consecutive dots
/// and leading or trailing `.`/`@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains("..") {
        return false;
    }
    if email.starts_with('.') || email.ends_with('.') {
        return false;
    }
    if email.starts_with('@') || email.ends_with('@') {
        return false;
    }
    EMAIL_PATTERN.is_match(email)
}

fn validate_username_length(username: &str) -> Result<(), ValidationError> {
    let chars = username.chars().count();
    if chars < 3 {
        return Err(ValidationError::new("length")
            .with_message("username must be at least 3 characters long".into()));
    }
    if chars > 50 {
        return Err(ValidationError::new("length")
            .with_message("username must be at most 50 characters long".into()));
    }
    Ok(())
}

fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("invalid email format".into()))
    }
}

/// Persisted user account
///
/// `password_hash` is never serialized and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Materialize a persisted user from its creation record
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
            updated_at: new_user.updated_at,
        }
    }

    /// Update the role and stamp the update time
    pub fn set_role(&mut self, role: Role, at: DateTime<Utc>) {
        self.role = role;
        self.updated_at = at;
    }

    /// Check if this user is an active super admin
    #[inline]
    pub fn is_active_super_admin(&self) -> bool {
        self.is_active && self.role == Role::SuperAdmin
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// User record that has not been persisted yet
///
/// The repository assigns the ID on creation.
#[derive(Clone, PartialEq, Eq, Validate)]
pub struct NewUser {
    #[validate(custom(function = "validate_username_length"))]
    pub username: String,

    #[validate(custom(function = "validate_email_format"))]
    pub email: String,

    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Create an active `user`-role record stamped with the current time
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            username,
            email,
            password_hash,
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Override the initial role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Structural validation: username length, then email format
    ///
    /// Reports only the first failing field so callers get a single,
    /// deterministic error.
    pub fn check(&self) -> Result<(), DomainError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let fields = errors.field_errors();
        if let Some(first) = fields.get("username").and_then(|errs| errs.first()) {
            let message = first
                .message
                .as_ref()
                .map_or_else(|| "invalid username".to_string(), ToString::to_string);
            return Err(DomainError::Validation(message));
        }
        if fields.contains_key("email") {
            return Err(DomainError::InvalidEmail);
        }

        Err(DomainError::Validation(errors.to_string()))
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}
