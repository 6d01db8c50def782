//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use auth_common::AppError;
use auth_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (credentials, tokens, hashing, etc.)
    App(AppError),
}

/// Coarse classification of a [`ServiceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    AlreadyExists,
    InvalidCredentials,
    AccountDisabled,
    /// Empty, malformed or expired token
    Token,
    PermissionDenied,
    UserNotFound,
    InvalidRole,
    CannotModifySelf,
    LastSuperAdmin,
    /// Wrapped hashing, repository or signing failure
    Internal,
}

impl ErrorKind {
    /// Get the HTTP status code for this kind
    pub fn status_code(self) -> u16 {
        match self {
            Self::Validation | Self::InvalidRole => 400,
            Self::InvalidCredentials | Self::Token => 401,
            Self::AccountDisabled
            | Self::PermissionDenied
            | Self::CannotModifySelf
            | Self::LastSuperAdmin => 403,
            Self::UserNotFound => 404,
            Self::AlreadyExists => 409,
            Self::Internal => 500,
        }
    }

    fn of_domain(err: &DomainError) -> Self {
        match err {
            DomainError::UserNotFound(_) => Self::UserNotFound,
            DomainError::Validation(_) | DomainError::InvalidEmail => Self::Validation,
            DomainError::InvalidRole(_) => Self::InvalidRole,
            DomainError::PermissionDenied => Self::PermissionDenied,
            DomainError::CannotModifySelf => Self::CannotModifySelf,
            DomainError::LastSuperAdmin => Self::LastSuperAdmin,
            DomainError::UsernameAlreadyExists | DomainError::EmailAlreadyExists => {
                Self::AlreadyExists
            }
            DomainError::Database(_) | DomainError::Internal(_) => Self::Internal,
        }
    }

    fn of_app(err: &AppError) -> Self {
        match err {
            AppError::InvalidCredentials => Self::InvalidCredentials,
            AppError::AccountDisabled => Self::AccountDisabled,
            AppError::EmptyToken | AppError::InvalidToken | AppError::TokenExpired => Self::Token,
            AppError::EmptyPassword | AppError::Validation(_) => Self::Validation,
            AppError::MissingUser | AppError::Internal(_) | AppError::Config(_) => Self::Internal,
            AppError::Domain(e) => Self::of_domain(e),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::App(AppError::Validation(msg.into()))
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => ErrorKind::of_domain(e),
            Self::App(e) => ErrorKind::of_app(e),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::Domain(e),
            other => Self::App(other),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
