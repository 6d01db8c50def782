//! Test helpers for integration tests
//!
//! Provides a ready-wired service environment and a repository that fails
//! every call.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use auth_common::{PasswordConfig, PasswordService, TokenService};
use auth_core::{DomainError, NewUser, RepoResult, Role, User, UserId, UserRepository};
use auth_db::InMemoryUserRepository;
use auth_service::{AuthService, ErrorKind, RoleService, ServiceContext, ServiceResult};

use crate::fixtures::{unique_suffix, RegisterRequest, TEST_SECRET};

/// Services wired to a fresh in-memory repository
pub struct TestEnv {
    pub ctx: ServiceContext,
    pub repo: Arc<InMemoryUserRepository>,
}

impl TestEnv {
    pub fn new() -> Self {
        let repo = Arc::new(InMemoryUserRepository::new());
        Self {
            ctx: context_with(repo.clone()),
            repo,
        }
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.ctx)
    }

    pub fn roles(&self) -> RoleService<'_> {
        RoleService::new(&self.ctx)
    }

    /// Register through the service
    pub async fn register(&self, request: &RegisterRequest) -> ServiceResult<User> {
        self.auth()
            .register(&request.username, &request.email, &request.password)
            .await
    }

    /// Insert an active account with the given role, bypassing registration
    pub async fn seed(&self, role: Role) -> User {
        let suffix = unique_suffix();
        let username = format!("{}{suffix}", role.as_str().replace('_', ""));
        self.repo
            .create(
                NewUser::new(
                    username.clone(),
                    format!("{username}@example.com"),
                    "$argon2id$seeded".to_string(),
                )
                .with_role(role),
            )
            .await
            .expect("seeding an account")
    }

    /// Current stored role of an account
    pub async fn role_of(&self, id: UserId) -> Role {
        self.roles().user_role(id).await.expect("stored role")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a service context over any repository
pub fn context_with(repo: Arc<dyn UserRepository>) -> ServiceContext {
    ServiceContext::new(
        repo,
        Arc::new(TokenService::new(TEST_SECRET).expect("test secret")),
        Arc::new(PasswordService::new(PasswordConfig::for_tests()).expect("test params")),
    )
}

/// Assert that a service result failed with the given kind
pub fn assert_kind<T: std::fmt::Debug>(result: ServiceResult<T>, kind: ErrorKind) {
    match result {
        Ok(value) => panic!("expected {kind:?}, got Ok({value:?})"),
        Err(err) => assert_eq!(err.kind(), kind, "unexpected error: {err}"),
    }
}

/// Repository whose every call fails as if the database were unreachable
#[derive(Debug, Default)]
pub struct FailingRepository;

impl FailingRepository {
    fn fail<T>() -> RepoResult<T> {
        Err(DomainError::Database("connection reset by peer".to_string()))
    }
}

#[async_trait]
impl UserRepository for FailingRepository {
    async fn create(&self, _user: NewUser) -> RepoResult<User> {
        Self::fail()
    }

    async fn find_by_username(&self, _username: &str) -> RepoResult<Option<User>> {
        Self::fail()
    }

    async fn find_by_email(&self, _email: &str) -> RepoResult<Option<User>> {
        Self::fail()
    }

    async fn find_by_id(&self, _id: UserId) -> RepoResult<Option<User>> {
        Self::fail()
    }

    async fn update(&self, _user: &User) -> RepoResult<()> {
        Self::fail()
    }

    async fn delete(&self, _id: UserId) -> RepoResult<()> {
        Self::fail()
    }

    async fn list_by_role(&self, _role: Role) -> RepoResult<Vec<User>> {
        Self::fail()
    }

    async fn count_by_role(&self, _role: Role) -> RepoResult<u64> {
        Self::fail()
    }

    async fn change_role(
        &self,
        _id: UserId,
        _role: Role,
        _updated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        Self::fail()
    }
}
