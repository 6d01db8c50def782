//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Implementations own all synchronization:
//! the services hold no state of their own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{NewUser, Role, User};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with its assigned ID
    ///
    /// Must atomically reject a username or email already held by an active
    /// user with `UsernameAlreadyExists` / `EmailAlreadyExists`.
    async fn create(&self, user: NewUser) -> RepoResult<User>;

    /// Find user by username
    ///
    /// Returns the active holder of the username if there is one, otherwise
    /// the most recently created inactive holder.
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by email, with the same active-first rule as `find_by_username`
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by ID, active or not
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user (sets `is_active = false`)
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// List active users holding a role, ordered by ID
    async fn list_by_role(&self, role: Role) -> RepoResult<Vec<User>>;

    /// Count active users holding a role
    async fn count_by_role(&self, role: Role) -> RepoResult<u64>;

    /// Write a new role for a user
    ///
    /// When the stored role is `super_admin` and `role` is not, the number of
    /// active super admins is re-checked in the same critical section as the
    /// write; if it is one or fewer the write fails with `LastSuperAdmin`.
    async fn change_role(
        &self,
        id: UserId,
        role: Role,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()>;
}
