//! pool-auth entry point
//!
//! Run with:
//! ```bash
//! cargo run -p auth-cli -- --help
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use auth_cli::{execute, Cli};
use auth_common::{try_init_tracing_with_config, Environment, TracingConfig};
use clap::Parser;
use tracing::{error, Level};

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|value| value.parse::<Environment>().ok())
        .unwrap_or_default();

    // Logs go to stderr so command output stays pipeable
    let mut tracing_config = TracingConfig::for_environment(env).with_stderr();
    if !cli.verbose {
        tracing_config.level = Level::WARN;
    }
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = execute(cli.command).await {
        error!(error = %format!("{e:#}"), "Command failed");
        std::process::exit(1);
    }
}
