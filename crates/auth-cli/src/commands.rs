//! Command implementations

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use auth_common::{AppConfig, DatabaseConfig, PasswordConfig, PasswordService, TokenService};
use auth_core::{Role, UserRepository};
use auth_db::{create_pool, ensure_schema, PgPool, PgUserRepository};
use auth_service::{AuthService, ServiceContext};

use crate::cli::{BootstrapAdminArgs, Commands};

/// Run a parsed command, printing its result to stdout
pub async fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::HashPassword(args) => {
            let config = AppConfig::password_from_env()?;
            println!("{}", hash_password(config, &args.password)?);
        }
        Commands::VerifyToken(args) => {
            let config = AppConfig::from_env()?;
            println!("{}", verify_token(&config.jwt.secret, &args.token)?);
        }
        Commands::Migrate => {
            let config = AppConfig::from_env()?;
            connect(database_config(&config)?).await?;
            println!("schema applied");
        }
        Commands::BootstrapAdmin(args) => {
            let config = AppConfig::from_env()?;
            let pool = connect(database_config(&config)?).await?;
            let repo = Arc::new(PgUserRepository::new(pool));
            let ctx = ServiceContext::from_config(repo.clone(), &config)?;
            println!("{}", bootstrap_admin(&ctx, repo.as_ref(), &args).await?);
        }
    }
    Ok(())
}

/// Hash a password and return the PHC string
pub fn hash_password(config: PasswordConfig, password: &str) -> Result<String> {
    let service = PasswordService::new(config)?;
    Ok(service.hash(password)?)
}

/// Validate a token and return its claims as pretty JSON
pub fn verify_token(secret: &str, token: &str) -> Result<String> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token);

    let claims = TokenService::new(secret)?.validate(token)?;
    let expires_at = claims.expires_at();
    Ok(serde_json::to_string_pretty(&json!({
        "claims": claims,
        "expires_at": expires_at,
    }))?)
}

/// Register an account and promote it to super admin
///
/// Fails when an active super admin already exists. Returns the new account
/// as pretty JSON.
pub async fn bootstrap_admin(
    ctx: &ServiceContext,
    repo: &dyn UserRepository,
    args: &BootstrapAdminArgs,
) -> Result<String> {
    if repo.count_by_role(Role::SuperAdmin).await? > 0 {
        bail!("an active super admin already exists; use role management instead");
    }

    let mut user = AuthService::new(ctx)
        .register(&args.username, &args.email, &args.password)
        .await?;

    repo.change_role(user.id, Role::SuperAdmin, Utc::now())
        .await
        .context("failed to promote bootstrap account")?;
    user.role = Role::SuperAdmin;

    info!(user_id = %user.id, "Bootstrap super admin created");
    Ok(serde_json::to_string_pretty(&user)?)
}

fn database_config(config: &AppConfig) -> Result<&DatabaseConfig> {
    config
        .database
        .as_ref()
        .context("DATABASE_URL is required for this command")
}

async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = create_pool(config)
        .await
        .context("failed to connect to the database")?;
    ensure_schema(&pool)
        .await
        .context("failed to apply the users schema")?;
    Ok(pool)
}
