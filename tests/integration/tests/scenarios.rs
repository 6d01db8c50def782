//! End-to-end account scenarios
//!
//! Run with: cargo test -p integration-tests --test scenarios

use std::sync::Arc;

use chrono::{Duration, Utc};

use auth_common::{AppError, TokenService, TOKEN_TTL_SECS};
use auth_core::{DomainError, Role, UserRepository};
use auth_service::{AuthService, ErrorKind, ServiceError};
use integration_tests::{
    assert_kind, context_with, FailingRepository, RegisterRequest, TestEnv, TEST_PASSWORD,
    TEST_SECRET,
};

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let env = TestEnv::new();
    env.register(&RegisterRequest::named("alice")).await.unwrap();

    let duplicate = RegisterRequest::named("alice").with_email("alice2@example.com");
    let err = env.register(&duplicate).await.unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::UsernameAlreadyExists)));
    assert_eq!(err.status_code(), 409);
    assert_eq!(env.repo.len(), 1);
}

#[tokio::test]
async fn test_short_password_rejected() {
    let env = TestEnv::new();
    let request = RegisterRequest::named("bob").with_password("short");

    let err = env.register(&request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("at least 8 characters"));
    assert!(env.repo.is_empty());
}

#[tokio::test]
async fn test_registered_account_defaults() {
    let env = TestEnv::new();
    let user = env.register(&RegisterRequest::unique()).await.unwrap();

    assert_eq!(user.role, Role::User);
    assert!(user.is_active);
    assert_eq!(user.created_at, user.updated_at);
    assert_ne!(user.password_hash, TEST_PASSWORD);

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_failures_indistinguishable() {
    let env = TestEnv::new();
    env.register(&RegisterRequest::named("carol")).await.unwrap();

    let unknown = env.auth().login("nobody", TEST_PASSWORD).await.unwrap_err();
    let wrong = env.auth().login("carol", "WrongPass123!").await.unwrap_err();

    assert!(matches!(unknown, ServiceError::App(AppError::InvalidCredentials)));
    assert!(matches!(wrong, ServiceError::App(AppError::InvalidCredentials)));
    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(unknown.error_code(), wrong.error_code());
}

#[tokio::test]
async fn test_login_issues_token_for_user() {
    let env = TestEnv::new();
    let user = env.register(&RegisterRequest::named("dave")).await.unwrap();

    let session = env.auth().login("dave", TEST_PASSWORD).await.unwrap();
    let claims = env.auth().validate_token(&session.token).unwrap();

    assert_eq!(claims.user_id(), user.id);
    assert_eq!(claims.username, "dave");
    assert_eq!(claims.email, "dave@example.com");
    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
}

#[tokio::test]
async fn test_login_disabled_account() {
    let env = TestEnv::new();
    let user = env.register(&RegisterRequest::named("erin")).await.unwrap();
    env.repo.delete(user.id).await.unwrap();

    let result = env.auth().login("erin", TEST_PASSWORD).await;
    assert_kind(result, ErrorKind::AccountDisabled);
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_lone_super_admin_cannot_self_demote() {
    let env = TestEnv::new();
    let root = env.seed(Role::SuperAdmin).await;

    let result = env.roles().demote_to_user(&root, root.id).await;
    assert_kind(result, ErrorKind::LastSuperAdmin);
    assert_eq!(env.role_of(root.id).await, Role::SuperAdmin);
}

#[tokio::test]
async fn test_admin_versus_admin_and_super_admin_versus_admin() {
    let env = TestEnv::new();
    env.seed(Role::SuperAdmin).await;
    let root = env.seed(Role::SuperAdmin).await;
    let admin = env.seed(Role::Admin).await;
    let other_admin = env.seed(Role::Admin).await;

    let result = env.roles().demote_to_user(&admin, other_admin.id).await;
    assert_kind(result, ErrorKind::PermissionDenied);
    assert_eq!(env.role_of(other_admin.id).await, Role::Admin);

    env.roles().demote_to_user(&root, other_admin.id).await.unwrap();
    assert_eq!(env.role_of(other_admin.id).await, Role::User);
}

// ============================================================================
// Tokens
// ============================================================================

#[tokio::test]
async fn test_empty_and_expired_tokens() {
    let env = TestEnv::new();
    let user = env.register(&RegisterRequest::named("frank")).await.unwrap();

    let err = env.auth().validate_token("").unwrap_err();
    assert!(matches!(err, ServiceError::App(AppError::EmptyToken)));

    let issued = Utc::now() - Duration::seconds(TOKEN_TTL_SECS + 1);
    let stale = TokenService::new(TEST_SECRET)
        .unwrap()
        .issue_at(&user, issued)
        .unwrap();
    let err = env.auth().validate_token(&stale).unwrap_err();
    assert!(matches!(err, ServiceError::App(AppError::TokenExpired)));
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn test_token_from_other_deployment_rejected() {
    let env = TestEnv::new();
    let user = env.register(&RegisterRequest::named("grace")).await.unwrap();
    let foreign = TokenService::new("some-other-secret")
        .unwrap()
        .issue(&user)
        .unwrap();

    let err = env.auth().validate_token(&foreign).unwrap_err();
    assert!(matches!(err, ServiceError::App(AppError::InvalidToken)));
}

#[tokio::test]
async fn test_claims_outlive_role_change_until_rechecked() {
    let env = TestEnv::new();
    let root = env.seed(Role::SuperAdmin).await;
    env.register(&RegisterRequest::named("heidi")).await.unwrap();
    let session = env.auth().login("heidi", TEST_PASSWORD).await.unwrap();

    env.roles().promote_to_moderator(&root, session.user.id).await.unwrap();

    // Claims carry no role, and the opt-in lookup sees the fresh record
    let claims = env.auth().validate_token(&session.token).unwrap();
    assert_eq!(claims.user_id(), session.user.id);
    let current = env.auth().user_from_token(&session.token).await.unwrap();
    assert_eq!(current.role, Role::Moderator);
}

// ============================================================================
// Storage failures
// ============================================================================

#[tokio::test]
async fn test_repository_failures_surface_as_internal() {
    let ctx = context_with(Arc::new(FailingRepository));
    let auth = AuthService::new(&ctx);

    let result = auth.register("ivan", "ivan@example.com", TEST_PASSWORD).await;
    assert_kind(result, ErrorKind::Internal);

    // Not collapsed into InvalidCredentials
    let result = auth.login("ivan", TEST_PASSWORD).await;
    assert_kind(result, ErrorKind::Internal);
}
