//! Event entity model, wire shapes, and DTOs.
//!
//! The `events` table stores the location flattened into three columns and
//! keeps the nested substructures (date slots, payment options, schedule,
//! rules, ...) as JSONB. [`Event`] mirrors the row; [`EventResponse`]
//! re-nests the location for API output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use encuentro_core::payment::PaymentOptions;
use encuentro_core::slots::{first_bookable_date, DateSlots};
use encuentro_core::types::{DbId, Timestamp};

/// Geographic location as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub lng: f64,
    pub lat: f64,
}

/// Full event row from the `events` table, location columns flattened.
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub location_address: String,
    pub location_lng: f64,
    pub location_lat: f64,
    pub date_times: Json<DateSlots>,
    pub user_id: DbId,
    pub payment_link: Option<Json<PaymentOptions>>,
    pub min_price: f64,
    pub tags: Vec<String>,
    pub transport_guide: String,
    pub schedule: Option<Json<BTreeMap<String, String>>>,
    pub exclusive_parking: bool,
    pub rules: Option<Json<Vec<String>>>,
    pub social_links: Option<Json<BTreeMap<String, String>>>,
    pub accessibility: Option<Json<Vec<String>>>,
    pub delivery_method: String,
    pub main_image_url: String,
    pub additional_images: Option<Json<Vec<String>>>,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// External-facing event shape with the location re-nested.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub date_times: DateSlots,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub payment_link: Option<PaymentOptions>,
    pub min_price: f64,
    pub tags: Vec<String>,
    pub transport_guide: String,
    pub schedule: Option<BTreeMap<String, String>>,
    pub exclusive_parking: bool,
    pub rules: Option<Vec<String>>,
    pub social_links: Option<BTreeMap<String, String>>,
    pub accessibility: Option<Vec<String>>,
    pub delivery_method: String,
    pub main_image_url: String,
    pub additional_images: Option<Vec<String>>,
    pub category: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            location: Location {
                address: event.location_address,
                lng: event.location_lng,
                lat: event.location_lat,
            },
            date_times: event.date_times.0,
            user_id: event.user_id,
            created_at: event.created_at,
            updated_at: event.updated_at,
            payment_link: event.payment_link.map(|j| j.0),
            min_price: event.min_price,
            tags: event.tags,
            transport_guide: event.transport_guide,
            schedule: event.schedule.map(|j| j.0),
            exclusive_parking: event.exclusive_parking,
            rules: event.rules.map(|j| j.0),
            social_links: event.social_links.map(|j| j.0),
            accessibility: event.accessibility.map(|j| j.0),
            delivery_method: event.delivery_method,
            main_image_url: event.main_image_url,
            additional_images: event.additional_images.map(|j| j.0),
            category: event.category,
        }
    }
}

/// DTO for creating a new event. The owner comes from the access token, not
/// the request body.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub name: String,
    pub description: String,
    pub location: Location,
    pub date_times: DateSlots,
    pub payment_link: Option<PaymentOptions>,
    pub min_price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub transport_guide: Option<String>,
    pub schedule: Option<BTreeMap<String, String>>,
    pub exclusive_parking: Option<bool>,
    pub rules: Option<Vec<String>>,
    pub social_links: Option<BTreeMap<String, String>>,
    pub accessibility: Option<Vec<String>>,
    pub delivery_method: Option<String>,
    pub main_image_url: Option<String>,
    pub additional_images: Option<Vec<String>>,
    pub category: String,
}

/// DTO for updating an existing event. All fields are optional; omitted
/// fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub date_times: Option<DateSlots>,
    pub payment_link: Option<PaymentOptions>,
    pub min_price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub transport_guide: Option<String>,
    pub schedule: Option<BTreeMap<String, String>>,
    pub exclusive_parking: Option<bool>,
    pub rules: Option<Vec<String>>,
    pub social_links: Option<BTreeMap<String, String>>,
    pub accessibility: Option<Vec<String>>,
    pub delivery_method: Option<String>,
    pub main_image_url: Option<String>,
    pub additional_images: Option<Vec<String>>,
    pub category: Option<String>,
}

/// Optional filters for `GET /events`, combinable via query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Array-overlap tag match.
    pub tag: Option<String>,
    /// Slot-key existence match (`DD/MM/YYYY`).
    pub date: Option<String>,
    /// Case-insensitive name prefix match.
    pub name: Option<String>,
}

/// Subset of event columns fetched for the paginated card listing.
#[derive(Debug, Clone, FromRow)]
pub struct EventSummaryRow {
    pub id: DbId,
    pub name: String,
    pub main_image_url: String,
    pub date_times: Json<DateSlots>,
    pub min_price: f64,
}

/// Wire shape for `GET /events/summaries`.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub id: DbId,
    pub name: String,
    /// Earliest bookable slot key, or `null` when every slot is sold out.
    pub first_available_date: Option<String>,
    pub main_image_url: String,
    pub min_price: f64,
}

impl From<EventSummaryRow> for EventSummary {
    fn from(row: EventSummaryRow) -> Self {
        let first_available_date = first_bookable_date(&row.date_times.0).map(str::to_string);
        Self {
            id: row.id,
            name: row.name,
            first_available_date,
            main_image_url: row.main_image_url,
            min_price: row.min_price,
        }
    }
}
