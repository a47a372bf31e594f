//! Data access for user accounts.

use sqlx::PgPool;

use encuentro_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, UpdateUser, User};

/// Kept in one place so every query returns a row that maps onto [`User`].
const COLUMNS: &str = "id, username, email, password_hash, whatsapp, \
                       reset_token, reset_token_expires_at, created_at, updated_at";

/// Account CRUD plus the password-reset token lifecycle.
pub struct UserRepo;

impl UserRepo {
    /// Persist a signup and return the stored row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, whatsapp)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.whatsapp)
            .fetch_one(pool)
            .await
    }

    /// Look up by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up by exact email, the login identifier.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// All accounts, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&sql).fetch_all(pool).await
    }

    /// Apply the non-`None` fields of `input` and return the updated row,
    /// or `None` when the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let sql = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                whatsapp = COALESCE($5, whatsapp)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.whatsapp)
            .fetch_optional(pool)
            .await
    }

    /// Remove an account. `true` when a row was deleted.
    ///
    /// Registrations referencing the account go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach a reset token to the account with the given email, replacing
    /// any earlier one. `true` when an account matched.
    pub async fn set_reset_token(
        pool: &PgPool,
        email: &str,
        token: &str,
        expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET reset_token = $2, reset_token_expires_at = $3 WHERE email = $1",
        )
        .bind(email)
        .bind(token)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Resolve a reset token to its account. Expired tokens match nothing.
    pub async fn find_by_reset_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM users
             WHERE reset_token = $1 AND reset_token_expires_at > NOW()"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Swap in a new password hash and invalidate the reset token in the
    /// same statement. `true` when the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                password_hash = $2,
                reset_token = NULL,
                reset_token_expires_at = NULL
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
