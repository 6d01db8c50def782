//! Service context - dependency container for services
//!
//! Holds the user repository and the credential primitives needed by services.

use std::sync::Arc;

use auth_common::{AppConfig, AppError, PasswordService, TokenService};
use auth_core::UserRepository;

/// Service context containing all dependencies
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    token_service: Arc<TokenService>,
    password_service: Arc<PasswordService>,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_service: Arc<TokenService>,
        password_service: Arc<PasswordService>,
    ) -> Self {
        Self {
            user_repo,
            token_service,
            password_service,
        }
    }

    /// Build the credential primitives from configuration
    ///
    /// # Errors
    /// Returns `AppError::Config` for an empty secret or invalid Argon2
    /// parameters
    pub fn from_config(
        user_repo: Arc<dyn UserRepository>,
        config: &AppConfig,
    ) -> Result<Self, AppError> {
        let token_service = TokenService::new(&config.jwt.secret)?;
        let password_service = PasswordService::new(config.password)?;

        Ok(Self::new(
            user_repo,
            Arc::new(token_service),
            Arc::new(password_service),
        ))
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the token service
    pub fn token_service(&self) -> &TokenService {
        self.token_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        self.password_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("user_repo", &"dyn UserRepository")
            .field("token_service", &self.token_service)
            .field("password_service", &self.password_service)
            .finish()
    }
}
