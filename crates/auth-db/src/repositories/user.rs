//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use auth_core::{DomainError, NewUser, RepoResult, Role, User, UserId, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// Serializes role writes across connections for the duration of a transaction
const ROLE_CHANGE_LOCK_KEY: i64 = 0x7573_6572_726f_6c65;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, is_active, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one_active_first(&self, column: &str, value: &str) -> RepoResult<Option<User>> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {column} = $1 \
             ORDER BY is_active DESC, id DESC LIMIT 1"
        );

        let result = sqlx::query_as::<_, UserModel>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {USER_COLUMNS}"
        );

        let model = sqlx::query_as::<_, UserModel>(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        User::try_from(model)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.find_one_active_first("username", username).await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one_active_first("email", email).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let result = sqlx::query_as::<_, UserModel>(&query)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, role = $5,
                is_active = $6, updated_at = $7
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_role(&self, role: Role) -> RepoResult<Vec<User>> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 AND is_active ORDER BY id"
        );

        let models = sqlx::query_as::<_, UserModel>(&query)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        models.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_role(&self, role: Role) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE role = $1 AND is_active",
        )
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn change_role(
        &self,
        id: UserId,
        role: Role,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(ROLE_CHANGE_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT role FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| user_not_found(id))?;

        if current == Role::SuperAdmin.as_str() && role != Role::SuperAdmin {
            let super_admins = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM users WHERE role = $1 AND is_active",
            )
            .bind(Role::SuperAdmin.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if super_admins <= 1 {
                return Err(DomainError::LastSuperAdmin);
            }
        }

        sqlx::query("UPDATE users SET role = $2, updated_at = $3 WHERE id = $1")
            .bind(id.into_inner())
            .bind(role.as_str())
            .bind(updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
