//! Business logic services
//!
//! Services are stateless orchestrators borrowing a [`ServiceContext`]; all
//! shared state lives behind the repository.

pub mod auth;
pub mod context;
pub mod error;
pub mod role;

// Re-export all services for convenience
pub use auth::{AuthService, Session};
pub use context::ServiceContext;
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use role::RoleService;

#[cfg(test)]
mod test_support;
