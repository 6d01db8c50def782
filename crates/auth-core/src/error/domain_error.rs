//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::UserId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    Validation(String),

    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid role: {0}")]
    InvalidRole(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("permission denied")]
    PermissionDenied,

    #[error("cannot modify your own role")]
    CannotModifySelf,

    #[error("cannot demote the last super admin")]
    LastSuperAdmin,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("username already exists")]
    UsernameAlreadyExists,

    #[error("email already exists")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::CannotModifySelf => "CANNOT_MODIFY_SELF",
            Self::LastSuperAdmin => "LAST_SUPER_ADMIN",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidEmail | Self::InvalidRole(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::CannotModifySelf | Self::LastSuperAdmin
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameAlreadyExists | Self::EmailAlreadyExists)
    }
}
