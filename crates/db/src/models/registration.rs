//! Registration entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use encuentro_core::types::{DbId, Timestamp};

/// Full registration row from the `registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub whatsapp: String,
    /// Chosen slot key (`DD/MM/YYYY`), if the attendee picked one.
    pub event_date: Option<String>,
    /// Chosen payment option title, if any.
    pub payment_link: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a registration.
#[derive(Debug)]
pub struct CreateRegistration {
    pub event_id: DbId,
    pub user_id: DbId,
    pub whatsapp: String,
    pub event_date: Option<String>,
    pub payment_link: Option<String>,
}

/// Attendee row for the public registration listing: user identity joined
/// with when they registered.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationDetail {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub whatsapp: String,
    pub registered_at: Timestamp,
}
