//! # auth-db
//!
//! Storage layer implementing the user repository contract.
//!
//! ## Overview
//!
//! - `PgUserRepository`: PostgreSQL via SQLx, with connection pool setup and
//!   the bundled `users` schema
//! - `InMemoryUserRepository`: process-local storage for tests and
//!   database-less deployments
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_common::DatabaseConfig;
//! use auth_db::{create_pool, ensure_schema, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/pool")).await?;
//!     ensure_schema(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryUserRepository;
pub use pool::{create_pool, ensure_schema, PgPool, SCHEMA_SQL};
pub use repositories::PgUserRepository;
