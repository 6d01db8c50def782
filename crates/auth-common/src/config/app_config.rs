//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::auth::PasswordConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    /// Present only when `DATABASE_URL` is set
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Database configuration
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Configuration for a URL with default pool sizing
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }

    #[must_use]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

// The URL usually embeds credentials
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[redacted]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Token signing configuration
#[derive(Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .finish()
    }
}

// Default value functions
fn default_app_name() -> String {
    "pool-auth".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `JWT_SECRET` is missing or empty, or if any
    /// variable that is set fails to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    /// Same as [`AppConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let secret = vars
            .get("JWT_SECRET")
            .ok_or(ConfigError::MissingVar("JWT_SECRET"))?;

        let database = match vars.get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: vars
                    .parse("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: vars
                    .parse("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                acquire_timeout_secs: vars
                    .parse("DATABASE_ACQUIRE_TIMEOUT_SECS")?
                    .unwrap_or_else(default_acquire_timeout_secs),
            }),
            None => None,
        };

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars.parse("APP_ENV")?.unwrap_or_default(),
            },
            database,
            jwt: JwtConfig { secret },
            password: vars.password_config()?,
        })
    }

    /// Load only the Argon2 work factor from environment variables
    ///
    /// For tools that hash passwords without signing tokens, so
    /// `JWT_SECRET` is not required.
    ///
    /// # Errors
    /// Returns an error if a `PASSWORD_*` variable fails to parse
    pub fn password_from_env() -> Result<PasswordConfig, ConfigError> {
        let _ = dotenvy::dotenv();

        let lookup = |key: &str| env::var(key).ok();
        Vars(&lookup).password_config()
    }
}

/// Lookup wrapper treating blank values as unset
struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn parse<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|e: T::Err| ConfigError::InvalidValue(key, e.to_string()))
            })
            .transpose()
    }

    fn password_config(&self) -> Result<PasswordConfig, ConfigError> {
        let defaults = PasswordConfig::default();

        Ok(PasswordConfig {
            memory_kib: self
                .parse("PASSWORD_MEMORY_KIB")?
                .unwrap_or(defaults.memory_kib),
            iterations: self
                .parse("PASSWORD_ITERATIONS")?
                .unwrap_or(defaults.iterations),
            parallelism: self
                .parse("PASSWORD_PARALLELISM")?
                .unwrap_or(defaults.parallelism),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
