//! In-memory implementation of UserRepository
//!
//! Data is not persisted and will be lost on restart. All reads and writes go
//! through one lock, so uniqueness checks and the last-super-admin re-check
//! are atomic with the write they guard.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use auth_core::{DomainError, NewUser, RepoResult, Role, User, UserId, UserRepository};

#[derive(Debug)]
struct State {
    users: BTreeMap<UserId, User>,
    next_id: i64,
}

impl State {
    /// Reject a username or email held by another active user
    ///
    /// A username clash wins over an email clash held by a different user.
    fn check_unique(
        &self,
        username: &str,
        email: &str,
        except: Option<UserId>,
    ) -> RepoResult<()> {
        if self.active_except(except).any(|u| u.username == username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if self.active_except(except).any(|u| u.email == email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        Ok(())
    }

    fn active_except(&self, except: Option<UserId>) -> impl Iterator<Item = &User> {
        self.users
            .values()
            .filter(move |u| u.is_active && Some(u.id) != except)
    }

    /// Active holder first, then the most recently created inactive one
    fn find_active_first<F>(&self, matches: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users
            .values()
            .filter(|u| matches(u))
            .max_by_key(|u| (u.is_active, u.id))
            .cloned()
    }

    fn active_with_role(&self, role: Role) -> impl Iterator<Item = &User> {
        self.users
            .values()
            .filter(move |u| u.is_active && u.role == role)
    }
}

/// In-memory user repository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl InMemoryUserRepository {
    /// Create an empty repository; IDs start at 1
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored users, active or not
    pub fn len(&self) -> usize {
        self.state.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let mut state = self.state.write();

        if user.is_active {
            state.check_unique(&user.username, &user.email, None)?;
        }

        let id = UserId::new(state.next_id);
        state.next_id += 1;

        let created = User::from_new(id, user);
        state.users.insert(id, created.clone());
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .read()
            .find_active_first(|u| u.username == username))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.state.read().find_active_first(|u| u.email == email))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state.write();

        if !state.users.contains_key(&user.id) {
            return Err(DomainError::UserNotFound(user.id));
        }
        if user.is_active {
            state.check_unique(&user.username, &user.email, Some(user.id))?;
        }

        state.users.insert(user.id, user.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let mut state = self.state.write();
        let user = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;

        user.is_active = false;
        user.updated_at = Utc::now();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_role(&self, role: Role) -> RepoResult<Vec<User>> {
        Ok(self.state.read().active_with_role(role).cloned().collect())
    }

    #[instrument(skip(self))]
    async fn count_by_role(&self, role: Role) -> RepoResult<u64> {
        Ok(self.state.read().active_with_role(role).count() as u64)
    }

    #[instrument(skip(self))]
    async fn change_role(
        &self,
        id: UserId,
        role: Role,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut state = self.state.write();

        let current = state
            .users
            .get(&id)
            .map(|u| u.role)
            .ok_or(DomainError::UserNotFound(id))?;

        let super_admins = state
            .users
            .values()
            .filter(|u| u.is_active_super_admin())
            .count();
        if current == Role::SuperAdmin && role != Role::SuperAdmin && super_admins <= 1 {
            return Err(DomainError::LastSuperAdmin);
        }

        if let Some(user) = state.users.get_mut(&id) {
            user.set_role(role, updated_at);
        }
        Ok(())
    }
}
