//! Repository for the `registrations` table.

use sqlx::PgPool;

use encuentro_core::types::DbId;

use crate::models::registration::{CreateRegistration, Registration, RegistrationDetail};

/// Kept in one place so every query returns a row that maps onto
/// [`Registration`].
const COLUMNS: &str = "id, event_id, user_id, whatsapp, event_date, payment_link, created_at";

/// Columns for the attendee detail view (registrations joined with users).
const DETAIL_COLUMNS: &str = "users.id AS user_id, users.username, users.email, \
                              users.whatsapp, registrations.created_at AS registered_at";

/// Provides registration CRUD plus attendee listings for an event.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Register a user for an event, returning the created row.
    ///
    /// The `uq_registrations_event_user` constraint rejects a second
    /// registration for the same (event, user) pair.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRegistration,
    ) -> Result<Registration, sqlx::Error> {
        let sql = format!(
            "INSERT INTO registrations (event_id, user_id, whatsapp, event_date, payment_link)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&sql)
            .bind(input.event_id)
            .bind(input.user_id)
            .bind(&input.whatsapp)
            .bind(&input.event_date)
            .bind(&input.payment_link)
            .fetch_one(pool)
            .await
    }

    /// Whether `user_id` is already registered for `event_id`.
    pub async fn exists(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Remove a user's registration for an event.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, event_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List everyone registered for an event, oldest registration first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error> {
        let sql = format!(
            "SELECT {DETAIL_COLUMNS} FROM registrations
             JOIN users ON registrations.user_id = users.id
             WHERE registrations.event_id = $1
             ORDER BY registrations.created_at ASC"
        );
        sqlx::query_as::<_, RegistrationDetail>(&sql)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch a single user's registration detail for an event, if any.
    pub async fn find_detail(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
    ) -> Result<Option<RegistrationDetail>, sqlx::Error> {
        let sql = format!(
            "SELECT {DETAIL_COLUMNS} FROM registrations
             JOIN users ON registrations.user_id = users.id
             WHERE registrations.event_id = $1 AND registrations.user_id = $2"
        );
        sqlx::query_as::<_, RegistrationDetail>(&sql)
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
