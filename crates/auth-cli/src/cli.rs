//! CLI argument parsing and command definitions.
//!
//! - `hash-password`: Print an Argon2id hash for a password
//! - `verify-token`: Validate a session token and print its claims
//! - `migrate`: Apply the bundled schema to the configured database
//! - `bootstrap-admin`: Create the first super admin

use clap::{Args, Parser, Subcommand};

/// Pool authentication operator tool
#[derive(Parser, Debug)]
#[command(name = "pool-auth", version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Hash a password with the configured Argon2id parameters
    ///
    /// Reads PASSWORD_MEMORY_KIB, PASSWORD_ITERATIONS and PASSWORD_PARALLELISM.
    #[command(name = "hash-password")]
    HashPassword(HashPasswordArgs),

    /// Validate a session token against JWT_SECRET and print its claims
    #[command(name = "verify-token")]
    VerifyToken(VerifyTokenArgs),

    /// Apply the users schema to DATABASE_URL
    Migrate,

    /// Register an account and make it the first super admin
    ///
    /// Refuses to run when an active super admin already exists.
    #[command(name = "bootstrap-admin")]
    BootstrapAdmin(BootstrapAdminArgs),
}

/// Arguments for the `hash-password` command
#[derive(Args, Debug, Clone)]
pub struct HashPasswordArgs {
    /// Password to hash
    pub password: String,
}

/// Arguments for the `verify-token` command
#[derive(Args, Debug, Clone)]
pub struct VerifyTokenArgs {
    /// Token to validate, with or without a `Bearer ` prefix
    pub token: String,
}

/// Arguments for the `bootstrap-admin` command
#[derive(Args, Debug, Clone)]
pub struct BootstrapAdminArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email for the new account
    #[arg(long)]
    pub email: String,

    /// Password for the new account
    #[arg(long, env = "BOOTSTRAP_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}
