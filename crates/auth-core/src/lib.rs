//! # auth-core
//!
//! Domain layer containing the user and role entities, the role hierarchy
//! rules, and the repository contract consumed by the services.
//! This crate has zero dependencies on infrastructure (database, crypto, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{is_valid_email, NewUser, Role, User};
pub use error::DomainError;
pub use traits::{RepoResult, UserRepository};
pub use value_objects::{UserId, UserIdParseError};
