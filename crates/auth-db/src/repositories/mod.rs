//! Repository implementations
//!
//! PostgreSQL implementation of the repository traits defined in auth-core.

mod error;
mod user;

pub use user::PgUserRepository;
