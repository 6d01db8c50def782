//! Role hierarchy tests
//!
//! Walks every actor/current/new role combination through the role service.
//!
//! Run with: cargo test -p integration-tests --test role_hierarchy

use auth_core::{Role, UserRepository};
use auth_service::ErrorKind;
use integration_tests::{assert_kind, TestEnv};

#[tokio::test]
async fn test_hierarchy_table() {
    for actor_role in Role::ALL {
        for current in Role::ALL {
            for new_role in Role::ALL {
                let env = TestEnv::new();
                // A spare super admin keeps the last-super-admin guard out of the way
                env.seed(Role::SuperAdmin).await;
                let actor = env.seed(actor_role).await;
                let target = env.seed(current).await;

                let result = env.roles().change_role(&actor, target.id, new_role).await;
                let allowed = actor_role.can_manage(current) && actor_role.can_manage(new_role);

                if allowed {
                    assert!(
                        result.is_ok(),
                        "{actor_role} changing {current} to {new_role}: {result:?}"
                    );
                    assert_eq!(env.role_of(target.id).await, new_role);
                } else {
                    let err = result.expect_err("change should be denied");
                    assert_eq!(
                        err.kind(),
                        ErrorKind::PermissionDenied,
                        "{actor_role} changing {current} to {new_role}"
                    );
                    assert_eq!(env.role_of(target.id).await, current);
                }
            }
        }
    }
}

#[tokio::test]
async fn test_self_modification_table() {
    for actor_role in Role::ALL {
        for new_role in Role::ALL {
            for spare in [false, true] {
                let env = TestEnv::new();
                if spare {
                    env.seed(Role::SuperAdmin).await;
                }
                let actor = env.seed(actor_role).await;

                let result = env.roles().change_role(&actor, actor.id, new_role).await;
                let steps_down = actor_role == Role::SuperAdmin && new_role != Role::SuperAdmin;

                match (steps_down, spare) {
                    (true, true) => {
                        assert!(result.is_ok(), "{actor_role} to {new_role}: {result:?}");
                        assert_eq!(env.role_of(actor.id).await, new_role);
                    }
                    (true, false) => {
                        assert_kind(result, ErrorKind::LastSuperAdmin);
                        assert_eq!(env.role_of(actor.id).await, Role::SuperAdmin);
                    }
                    (false, _) => {
                        assert_kind(result, ErrorKind::CannotModifySelf);
                        assert_eq!(env.role_of(actor.id).await, actor_role);
                    }
                }
            }
        }
    }
}

#[tokio::test]
async fn test_last_super_admin_protection() {
    let env = TestEnv::new();
    let first = env.seed(Role::SuperAdmin).await;
    let second = env.seed(Role::SuperAdmin).await;

    // With two, one may demote the other
    env.roles().promote_to_admin(&first, second.id).await.unwrap();
    assert_eq!(env.role_of(second.id).await, Role::Admin);

    // Now alone, the remaining one cannot step down
    let result = env.roles().demote_to_user(&first, first.id).await;
    assert_kind(result, ErrorKind::LastSuperAdmin);

    // And a stale super admin handle cannot demote it either
    let result = env.roles().demote_to_user(&second, first.id).await;
    assert_kind(result, ErrorKind::LastSuperAdmin);
    assert_eq!(env.role_of(first.id).await, Role::SuperAdmin);
}

#[tokio::test]
async fn test_disabled_super_admins_do_not_count() {
    let env = TestEnv::new();
    let root = env.seed(Role::SuperAdmin).await;
    let retired = env.seed(Role::SuperAdmin).await;
    env.repo.delete(retired.id).await.unwrap();

    let result = env.roles().demote_to_user(&root, root.id).await;
    assert_kind(result, ErrorKind::LastSuperAdmin);
}

#[tokio::test]
async fn test_listing_permissions() {
    let env = TestEnv::new();
    let root = env.seed(Role::SuperAdmin).await;
    let admin = env.seed(Role::Admin).await;
    let moderator = env.seed(Role::Moderator).await;
    let user = env.seed(Role::User).await;

    let admins = env.roles().list_admins(&root).await.unwrap();
    assert_eq!(
        admins.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![root.id, admin.id]
    );

    let moderators = env.roles().list_moderators(&admin).await.unwrap();
    assert_eq!(moderators.len(), 1);
    assert_eq!(moderators[0].id, moderator.id);

    assert_kind(env.roles().list_admins(&admin).await, ErrorKind::PermissionDenied);
    assert_kind(env.roles().list_moderators(&user).await, ErrorKind::PermissionDenied);
}
