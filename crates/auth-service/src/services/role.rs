//! Role service
//!
//! Changes account roles along the hierarchy `user < moderator < admin <
//! super_admin` and lists privileged accounts.

use auth_core::{DomainError, Role, User, UserId};
use chrono::Utc;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Change a user's role on behalf of `actor`
    ///
    /// Guards run before any write, in order: target exists, self
    /// modification, last super admin, actor manages the current role,
    /// actor manages the new role.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id, actor_role = %actor.role))]
    pub async fn change_role(
        &self,
        actor: &User,
        target_id: UserId,
        new_role: Role,
    ) -> ServiceResult<()> {
        self.apply_role_change(actor, target_id, new_role)
            .await
            .inspect_err(|e| warn!(error = %e, "Role change denied"))?;

        info!("Role changed");
        Ok(())
    }

    /// Change a user's role, parsing the role from its wire name
    ///
    /// Unknown names fail with `InvalidRole` before any other guard runs.
    pub async fn change_role_named(
        &self,
        actor: &User,
        target_id: UserId,
        new_role: &str,
    ) -> ServiceResult<()> {
        let role: Role = new_role.parse()?;
        self.change_role(actor, target_id, role).await
    }

    async fn apply_role_change(
        &self,
        actor: &User,
        target_id: UserId,
        new_role: Role,
    ) -> ServiceResult<()> {
        let repo = self.ctx.user_repo();

        let target = repo
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::UserNotFound(target_id))?;

        let is_self = actor.id == target_id;
        if is_self && !(actor.role == Role::SuperAdmin && new_role != Role::SuperAdmin) {
            return Err(DomainError::CannotModifySelf.into());
        }

        let demotes_super_admin = target.role == Role::SuperAdmin && new_role != Role::SuperAdmin;
        if (is_self || demotes_super_admin) && repo.count_by_role(Role::SuperAdmin).await? <= 1 {
            return Err(DomainError::LastSuperAdmin.into());
        }

        if !actor.role.can_manage(target.role) || !actor.role.can_manage(new_role) {
            return Err(DomainError::PermissionDenied.into());
        }

        repo.change_role(target_id, new_role, Utc::now()).await?;
        Ok(())
    }

    /// Promote a user to moderator
    pub async fn promote_to_moderator(&self, actor: &User, target_id: UserId) -> ServiceResult<()> {
        self.change_role(actor, target_id, Role::Moderator).await
    }

    /// Promote a user to admin
    pub async fn promote_to_admin(&self, actor: &User, target_id: UserId) -> ServiceResult<()> {
        self.change_role(actor, target_id, Role::Admin).await
    }

    /// Demote a user to the base role
    pub async fn demote_to_user(&self, actor: &User, target_id: UserId) -> ServiceResult<()> {
        self.change_role(actor, target_id, Role::User).await
    }

    /// List active moderators; requires admin or above
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn list_moderators(&self, actor: &User) -> ServiceResult<Vec<User>> {
        if !actor.role.is_at_least(Role::Admin) {
            return Err(DomainError::PermissionDenied.into());
        }
        Ok(self.ctx.user_repo().list_by_role(Role::Moderator).await?)
    }

    /// List active admins and super admins ordered by ID; super admins only
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn list_admins(&self, actor: &User) -> ServiceResult<Vec<User>> {
        if actor.role != Role::SuperAdmin {
            return Err(DomainError::PermissionDenied.into());
        }

        let repo = self.ctx.user_repo();
        let mut admins = repo.list_by_role(Role::Admin).await?;
        admins.extend(repo.list_by_role(Role::SuperAdmin).await?);
        admins.sort_by_key(|u| u.id);
        Ok(admins)
    }

    /// Current role of a user
    #[instrument(skip(self))]
    pub async fn user_role(&self, user_id: UserId) -> ServiceResult<Role> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .map(|u| u.role)
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}
