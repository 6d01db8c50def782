//! Password hashing and verification
//!
//! Uses Argon2id with a per-hash random salt. The output is a self-contained
//! PHC string, so verification reads the salt and work factor back out of
//! the stored hash and older hashes keep verifying after a parameter change.

use std::fmt;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::Deserialize;

use crate::error::AppError;

/// Argon2 work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordConfig {
    /// Minimal work factor for test suites; never use in production
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Password hasher with a fixed, tunable work factor
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    config: PasswordConfig,
}

impl PasswordService {
    /// Create a password service with the given work factor
    ///
    /// # Errors
    /// Returns `AppError::Config` if Argon2 rejects the parameters
    pub fn new(config: PasswordConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::Config(format!("invalid argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            config,
        })
    }

    /// Work factor used for new hashes
    pub fn config(&self) -> PasswordConfig {
        self.config
    }

    /// Hash a password with a fresh random salt
    ///
    /// # Errors
    /// Returns `AppError::EmptyPassword` if the password is blank, or
    /// `AppError::Internal` if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        if password.trim().is_empty() {
            return Err(AppError::EmptyPassword);
        }

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
    }

    /// Verify a password against a stored hash
    ///
    /// Returns false for a blank password, a blank or unparseable hash, or a
    /// mismatch. The digest comparison is constant-time.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if password.trim().is_empty() || hash.trim().is_empty() {
            return false;
        }

        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Run one full Argon2 derivation and report no match
    ///
    /// Stands in for `verify` when there is no stored hash, so an unknown
    /// account costs the same time as a wrong password.
    pub fn dummy_verify(&self, password: &str) -> bool {
        let salt = SaltString::generate(&mut OsRng);
        let _ = self.argon2.hash_password(password.as_bytes(), &salt);
        false
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
            config: PasswordConfig::default(),
        }
    }
}

impl fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
