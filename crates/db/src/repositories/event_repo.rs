//! Repository for the `events` table.
//!
//! Events carry a mix of flat columns (location, price floor, category) and
//! JSONB columns for the structured metadata: date slots, payment options,
//! schedule, rules, social links, accessibility notes and image galleries.

use sqlx::types::Json;
use sqlx::PgPool;

use encuentro_core::types::DbId;

use crate::models::event::{CreateEvent, Event, EventFilter, EventSummaryRow, UpdateEvent};

/// Kept in one place so every query returns a row that maps onto [`Event`].
const COLUMNS: &str = "id, name, description, location_address, location_lng, location_lat, \
                       date_times, user_id, payment_link, min_price, tags, transport_guide, \
                       schedule, exclusive_parking, rules, social_links, accessibility, \
                       delivery_method, main_image_url, additional_images, category, \
                       created_at, updated_at";

/// Provides CRUD, filtered listing and catalog queries for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event owned by `user_id`, returning the created row.
    ///
    /// Optional scalar fields fall back to the column defaults via COALESCE
    /// so the stored row never contains NULL in a non-nullable column.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateEvent,
    ) -> Result<Event, sqlx::Error> {
        let sql = format!(
            "INSERT INTO events (
                name, description, location_address, location_lng, location_lat,
                date_times, user_id, payment_link, min_price, tags, transport_guide,
                schedule, exclusive_parking, rules, social_links, accessibility,
                delivery_method, main_image_url, additional_images, category
             )
             VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, COALESCE($9, 0), COALESCE($10, '{{}}'::text[]), COALESCE($11, ''),
                $12, COALESCE($13, false), $14, $15, $16,
                COALESCE($17, ''), COALESCE($18, ''), $19, $20
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location.address)
            .bind(input.location.lng)
            .bind(input.location.lat)
            .bind(Json(&input.date_times))
            .bind(user_id)
            .bind(input.payment_link.as_ref().map(Json))
            .bind(input.min_price)
            .bind(&input.tags)
            .bind(&input.transport_guide)
            .bind(input.schedule.as_ref().map(Json))
            .bind(input.exclusive_parking)
            .bind(input.rules.as_ref().map(Json))
            .bind(input.social_links.as_ref().map(Json))
            .bind(input.accessibility.as_ref().map(Json))
            .bind(&input.delivery_method)
            .bind(&input.main_image_url)
            .bind(input.additional_images.as_ref().map(Json))
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// Look up by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events matching `filter`, newest first.
    ///
    /// All filters are optional and combine with AND:
    /// - `category` matches exactly
    /// - `tag` matches events whose tag array contains it
    /// - `date` (DD/MM/YYYY) matches events with a slot under that key
    /// - `name` is a case-insensitive prefix match
    pub async fn list(pool: &PgPool, filter: &EventFilter) -> Result<Vec<Event>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::text IS NULL OR category = $1)
               AND ($2::text IS NULL OR tags && ARRAY[$2])
               AND ($3::text IS NULL OR jsonb_exists(date_times, $3))
               AND ($4::text IS NULL OR name ILIKE $4 || '%')
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(&filter.category)
            .bind(&filter.tag)
            .bind(&filter.date)
            .bind(&filter.name)
            .fetch_all(pool)
            .await
    }

    /// List a page of lightweight event summaries, newest first.
    pub async fn summaries(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, EventSummaryRow>(
            "SELECT id, name, main_image_url, date_times, min_price FROM events
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Every distinct tag in use across all events, sorted.
    pub async fn distinct_tags(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT UNNEST(tags) AS tag FROM events ORDER BY tag",
        )
        .fetch_all(pool)
        .await
    }

    /// Every distinct category in use across all events, sorted.
    pub async fn distinct_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM events ORDER BY category")
            .fetch_all(pool)
            .await
    }

    /// Apply the non-`None` fields of `input` and return the updated row,
    /// or `None` when the id does not exist. Ownership is the caller's
    /// concern.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let sql = format!(
            "UPDATE events SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location_address = COALESCE($4, location_address),
                location_lng = COALESCE($5, location_lng),
                location_lat = COALESCE($6, location_lat),
                date_times = COALESCE($7, date_times),
                payment_link = COALESCE($8, payment_link),
                min_price = COALESCE($9, min_price),
                tags = COALESCE($10, tags),
                transport_guide = COALESCE($11, transport_guide),
                schedule = COALESCE($12, schedule),
                exclusive_parking = COALESCE($13, exclusive_parking),
                rules = COALESCE($14, rules),
                social_links = COALESCE($15, social_links),
                accessibility = COALESCE($16, accessibility),
                delivery_method = COALESCE($17, delivery_method),
                main_image_url = COALESCE($18, main_image_url),
                additional_images = COALESCE($19, additional_images),
                category = COALESCE($20, category)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.location.as_ref().map(|l| l.address.as_str()))
            .bind(input.location.as_ref().map(|l| l.lng))
            .bind(input.location.as_ref().map(|l| l.lat))
            .bind(input.date_times.as_ref().map(Json))
            .bind(input.payment_link.as_ref().map(Json))
            .bind(input.min_price)
            .bind(&input.tags)
            .bind(&input.transport_guide)
            .bind(input.schedule.as_ref().map(Json))
            .bind(input.exclusive_parking)
            .bind(input.rules.as_ref().map(Json))
            .bind(input.social_links.as_ref().map(Json))
            .bind(input.accessibility.as_ref().map(Json))
            .bind(&input.delivery_method)
            .bind(&input.main_image_url)
            .bind(input.additional_images.as_ref().map(Json))
            .bind(&input.category)
            .fetch_optional(pool)
            .await
    }

    /// Remove an event. `true` when a row was deleted.
    ///
    /// Registrations for the event go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
