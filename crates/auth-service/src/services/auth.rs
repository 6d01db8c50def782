//! Authentication service
//!
//! Handles user registration, login, and token resolution.

use auth_common::{AppError, Claims};
use auth_core::{DomainError, NewUser, User};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// Checks run in a fixed order and the first failure wins: username,
    /// email and password present, password length, username length and
    /// email format, then username and email availability. The returned
    /// user carries the stored hash.
    #[instrument(skip_all, fields(username = %username.trim()))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<User> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() {
            return Err(ServiceError::validation("username is required"));
        }
        if email.is_empty() {
            return Err(ServiceError::validation("email is required"));
        }
        if password.trim().is_empty() {
            return Err(AppError::EmptyPassword.into());
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ServiceError::validation(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters long"
            )));
        }

        let mut new_user = NewUser::new(username.to_string(), email.to_string(), String::new());
        new_user.check()?;

        let repo = self.ctx.user_repo();
        if repo
            .find_by_username(username)
            .await?
            .is_some_and(|u| u.is_active)
        {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if repo.find_by_email(email).await?.is_some_and(|u| u.is_active) {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        new_user.password_hash = self.ctx.password_service().hash(password)?;

        // The repository re-checks uniqueness atomically with the insert
        let user = repo.create(new_user).await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(user)
    }

    /// Login with username and password
    ///
    /// An unknown username and a wrong password fail with the same
    /// `InvalidCredentials` error.
    #[instrument(skip_all, fields(username = %username.trim()))]
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<Session> {
        let username = username.trim();

        if username.is_empty() {
            return Err(ServiceError::validation("username is required"));
        }
        if password.trim().is_empty() {
            return Err(AppError::EmptyPassword.into());
        }

        let Some(user) = self.ctx.user_repo().find_by_username(username).await? else {
            // Same Argon2 cost as a wrong password
            self.ctx.password_service().dummy_verify(password);
            warn!("Login failed: unknown username");
            return Err(AppError::InvalidCredentials.into());
        };

        if !user.is_active {
            warn!(user_id = %user.id, "Login failed: account disabled");
            return Err(AppError::AccountDisabled.into());
        }

        if !self
            .ctx
            .password_service()
            .verify(password, &user.password_hash)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let token = self.ctx.token_service().issue(&user)?;

        info!(user_id = %user.id, "User logged in successfully");
        Ok(Session { user, token })
    }

    /// Validate a token and return its claims
    ///
    /// Purely cryptographic: the claims reflect the user as of issuance.
    #[instrument(skip_all)]
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        Ok(self.ctx.token_service().validate(token)?)
    }

    /// Validate a token and load the current state of its user
    ///
    /// Fails with `InvalidToken` if the user no longer exists and with
    /// `AccountDisabled` if it has been deactivated since issuance.
    #[instrument(skip_all)]
    pub async fn user_from_token(&self, token: &str) -> ServiceResult<User> {
        let claims = self.validate_token(token)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(claims.user_id())
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            warn!(user_id = %user.id, "Token presented for disabled account");
            return Err(AppError::AccountDisabled.into());
        }

        Ok(user)
    }
}
