//! Concurrency tests
//!
//! Run with: cargo test -p integration-tests --test concurrency

use std::sync::Arc;

use tokio::sync::Barrier;
use tokio::task::JoinSet;

use auth_core::{DomainError, Role, UserRepository};
use auth_service::{AuthService, ErrorKind, RoleService, ServiceError};
use integration_tests::{RegisterRequest, TestEnv, TEST_PASSWORD};

const CONTENDERS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_same_username() {
    let env = TestEnv::new();
    let barrier = Arc::new(Barrier::new(CONTENDERS));
    let mut tasks = JoinSet::new();

    for i in 0..CONTENDERS {
        let ctx = env.ctx.clone();
        let barrier = barrier.clone();
        tasks.spawn(async move {
            barrier.wait().await;
            AuthService::new(&ctx)
                .register("contested", &format!("contender{i}@example.com"), TEST_PASSWORD)
                .await
        });
    }

    let mut created = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(
                matches!(err, ServiceError::Domain(DomainError::UsernameAlreadyExists)),
                "unexpected error: {err}"
            ),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(env.repo.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_distinct_users() {
    let env = TestEnv::new();
    let mut tasks = JoinSet::new();

    for _ in 0..CONTENDERS {
        let ctx = env.ctx.clone();
        let request = RegisterRequest::unique();
        tasks.spawn(async move {
            AuthService::new(&ctx)
                .register(&request.username, &request.email, &request.password)
                .await
        });
    }

    let mut ids = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        ids.push(joined.unwrap().unwrap().id);
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), CONTENDERS);
    assert_eq!(env.repo.len(), CONTENDERS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mutual_super_admin_demotion_keeps_one() {
    let env = TestEnv::new();
    let first = env.seed(Role::SuperAdmin).await;
    let second = env.seed(Role::SuperAdmin).await;
    let barrier = Arc::new(Barrier::new(2));
    let mut tasks = JoinSet::new();

    for (actor, target) in [(first.clone(), second.id), (second, first.id)] {
        let ctx = env.ctx.clone();
        let barrier = barrier.clone();
        tasks.spawn(async move {
            barrier.wait().await;
            RoleService::new(&ctx).demote_to_user(&actor, target).await
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.unwrap());
    }

    let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1);
    for err in outcomes.into_iter().filter_map(Result::err) {
        assert_eq!(err.kind(), ErrorKind::LastSuperAdmin);
    }
    assert_eq!(env.repo.count_by_role(Role::SuperAdmin).await.unwrap(), 1);
}
