//! User entity <-> model mapper

use auth_core::{DomainError, Role, User, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// Fails only if the stored role is outside the known set, which the
/// table's check constraint rules out.
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<Role>()
            .map_err(|_| DomainError::Database(format!("unknown stored role '{}'", model.role)))?;

        Ok(User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            role,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
