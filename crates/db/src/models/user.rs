//! `users` table types.

use serde::Serialize;
use sqlx::FromRow;

use encuentro_core::types::{DbId, Timestamp};

/// Complete `users` row, credential and reset columns included.
///
/// Never serialized; API responses go through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub whatsapp: String,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public projection of a user: no hash, no reset fields.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub whatsapp: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            whatsapp: user.whatsapp,
        }
    }
}

/// Insert payload. The password arrives already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub whatsapp: String,
}

/// Partial-update payload; `None` leaves a column untouched. The handler
/// strength-checks and re-hashes before setting `password_hash`.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub whatsapp: Option<String>,
}
