//! In-process repository implementations
//!
//! Used by tests and by deployments that run without PostgreSQL.

mod user;

pub use user::InMemoryUserRepository;
