//! Shared fixtures for service unit tests

use std::sync::Arc;

use auth_common::{PasswordConfig, PasswordService, TokenService};
use auth_core::{NewUser, Role, User, UserRepository};
use auth_db::InMemoryUserRepository;

use super::context::ServiceContext;

pub(crate) fn context() -> (ServiceContext, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let ctx = ServiceContext::new(
        repo.clone(),
        Arc::new(TokenService::new("unit-test-secret").unwrap()),
        Arc::new(PasswordService::new(PasswordConfig::for_tests()).unwrap()),
    );
    (ctx, repo)
}

/// Insert an active user with the given role directly into the repository
pub(crate) async fn seed(repo: &InMemoryUserRepository, username: &str, role: Role) -> User {
    repo.create(
        NewUser::new(
            username.to_string(),
            format!("{username}@example.com"),
            "$argon2id$unused".to_string(),
        )
        .with_role(role),
    )
    .await
    .unwrap()
}
