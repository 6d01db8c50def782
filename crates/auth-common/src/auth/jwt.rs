//! Session token signing and validation
//!
//! Tokens are HS256-signed JWTs carrying a snapshot of the user's identity.
//! Validation is purely cryptographic: it does not consult the user store,
//! so role changes or deactivation are not reflected until the token expires.

use std::fmt;

use auth_core::{User, UserId};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token lifetime: 24 hours
pub const TOKEN_TTL_SECS: i64 = 86_400;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::new(self.user_id)
    }

    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Issues and validates session tokens with a shared HMAC secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service for the given signing secret
    ///
    /// # Errors
    /// Returns `AppError::Config` if the secret is empty
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::Config("JWT secret must not be empty".to_string()));
        }

        // Expiry is checked by hand so the boundary second counts as expired
        // and no leeway applies. `exp` stays a required claim.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a token for a user, valid for 24 hours from now
    ///
    /// # Errors
    /// Returns `AppError::MissingUser` if the user has no assigned ID
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    ///
    /// # Errors
    /// Returns `AppError::MissingUser` if the user has no assigned ID, or
    /// `AppError::Internal` if signing fails
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, AppError> {
        if !user.id.is_assigned() {
            return Err(AppError::MissingUser);
        }

        let iat = now.timestamp();
        let claims = Claims {
            user_id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.clone(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    /// Returns `EmptyToken`, `InvalidToken` or `TokenExpired`
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`
    ///
    /// Every decoding failure (malformed, bad signature, unexpected algorithm,
    /// missing claims) collapses into `InvalidToken`.
    ///
    /// # Errors
    /// Returns `EmptyToken`, `InvalidToken` or `TokenExpired`
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::EmptyToken);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AppError::InvalidToken
            })?
            .claims;

        if claims.exp <= claims.iat || claims.user_id <= 0 {
            return Err(AppError::InvalidToken);
        }
        if now.timestamp() >= claims.exp {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_secs", &TOKEN_TTL_SECS)
            .finish_non_exhaustive()
    }
}
