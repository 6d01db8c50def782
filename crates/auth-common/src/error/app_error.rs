//! Application error types
//!
//! Errors raised by the credential primitives (hashing, tokens, config) and
//! the authentication flow, plus a transparent wrapper over domain errors.
//! No variant ever carries a password, a hash, or the signing secret.

use auth_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is disabled")]
    AccountDisabled,

    // Token errors
    #[error("token is required")]
    EmptyToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("user is required")]
    MissingUser,

    // Validation errors
    #[error("password is required")]
    EmptyPassword,

    #[error("{0}")]
    Validation(String),

    // Internal errors
    #[error("internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::EmptyPassword | Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::InvalidCredentials | Self::EmptyToken | Self::InvalidToken | Self::TokenExpired => {
                401
            }

            // 403 Forbidden
            Self::AccountDisabled => 403,

            // 500 Internal Server Error
            Self::MissingUser | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::EmptyToken => "EMPTY_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingUser => "MISSING_USER",
            Self::EmptyPassword => "VALIDATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is one of the token errors
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        matches!(self, Self::EmptyToken | Self::InvalidToken | Self::TokenExpired)
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error response structure for API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
