//! Error handling utilities for repositories

use auth_core::{DomainError, UserId};
use sqlx::Error as SqlxError;

const USERNAME_KEY: &str = "users_username_active_key";
const EMAIL_KEY: &str = "users_email_active_key";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Map a unique violation on the active-user indexes to the matching
/// conflict error; anything else becomes a database error
pub fn map_unique_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(USERNAME_KEY) => DomainError::UsernameAlreadyExists,
                Some(EMAIL_KEY) => DomainError::EmailAlreadyExists,
                _ => DomainError::Database(e.to_string()),
            };
        }
    }
    DomainError::Database(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}
