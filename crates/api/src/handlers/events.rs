use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveTime, Utc};
use encuentro_core::error::CoreError;
use encuentro_core::payment::validate_payment_options;
use encuentro_core::slots::{days_until, first_bookable_date, parse_slot_date, validate_date_slots};
use encuentro_core::tags::validate_tags;
use encuentro_core::types::DbId;
use encuentro_db::models::event::{
    CreateEvent, Event, EventFilter, EventResponse, EventSummary, UpdateEvent,
};
use encuentro_db::repositories::EventRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::state::AppState;
use crate::weather::{WeatherClient, WeatherError, WeatherReport};

/// Forecasts are attached only when the first bookable date is at most
/// this many days away. The provider serves 5 days of data; the window is
/// slightly wider so near-boundary dates still get the closest entry.
const FORECAST_WINDOW_DAYS: i64 = 7;

/// Event detail payload: the event plus an optional forecast for its
/// first bookable date.
#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    pub event: EventResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherReport>,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

fn validate_new_event(input: &CreateEvent) -> Result<(), CoreError> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Event name is required".to_string()));
    }
    if input.description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Event description is required".to_string(),
        ));
    }
    if input.location.address.trim().is_empty() {
        return Err(CoreError::Validation(
            "Event address is required".to_string(),
        ));
    }
    if input.category.trim().is_empty() {
        return Err(CoreError::Validation(
            "Event category is required".to_string(),
        ));
    }
    validate_date_slots(&input.date_times)?;
    if let Some(tags) = &input.tags {
        validate_tags(tags)?;
    }
    if let Some(payment) = &input.payment_link {
        validate_payment_options(payment)?;
    }
    Ok(())
}

fn validate_event_update(input: &UpdateEvent) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("Event name is required".to_string()));
        }
    }
    if let Some(description) = &input.description {
        if description.trim().is_empty() {
            return Err(CoreError::Validation(
                "Event description is required".to_string(),
            ));
        }
    }
    if let Some(location) = &input.location {
        if location.address.trim().is_empty() {
            return Err(CoreError::Validation(
                "Event address is required".to_string(),
            ));
        }
    }
    if let Some(category) = &input.category {
        if category.trim().is_empty() {
            return Err(CoreError::Validation(
                "Event category is required".to_string(),
            ));
        }
    }
    if let Some(slots) = &input.date_times {
        validate_date_slots(slots)?;
    }
    if let Some(tags) = &input.tags {
        validate_tags(tags)?;
    }
    if let Some(payment) = &input.payment_link {
        validate_payment_options(payment)?;
    }
    Ok(())
}

/// POST /api/v1/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    validate_new_event(&input)?;

    let event = EventRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(event_id = %event.id, user_id = %auth.user_id, "Event created");

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// GET /api/v1/events/{id}
///
/// A failed forecast lookup never fails the request; the event is
/// returned without the `weather` field.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EventDetailResponse>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Event", id))?;

    let weather = match &state.weather {
        Some(client) => match weather_for_event(client, &event).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(event_id = %id, error = %e, "Forecast lookup failed");
                None
            }
        },
        None => None,
    };

    Ok(Json(EventDetailResponse {
        event: EventResponse::from(event),
        weather,
    }))
}

/// Fetch a forecast for the event's first bookable date.
///
/// Returns `Ok(None)` when the event has no bookable date or the date is
/// outside the forecast window.
async fn weather_for_event(
    client: &WeatherClient,
    event: &Event,
) -> Result<Option<WeatherReport>, WeatherError> {
    let Some(key) = first_bookable_date(&event.date_times.0) else {
        return Ok(None);
    };
    let Ok(date) = parse_slot_date(key) else {
        return Ok(None);
    };

    let days = days_until(date, Utc::now().date_naive());
    if !(0..=FORECAST_WINDOW_DAYS).contains(&days) {
        return Ok(None);
    }

    let target = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    client
        .report_for(event.location_lat, event.location_lng, target)
        .await
}

/// GET /api/v1/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> AppResult<Json<Vec<EventResponse>>> {
    let events = EventRepo::list(&state.pool, &filter).await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// GET /api/v1/events/summaries
pub async fn event_summaries(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<Vec<EventSummary>>> {
    let rows = EventRepo::summaries(&state.pool, page.limit(), page.offset()).await?;
    Ok(Json(rows.into_iter().map(EventSummary::from).collect()))
}

/// GET /api/v1/events/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<TagsResponse>> {
    let tags = EventRepo::distinct_tags(&state.pool).await?;
    Ok(Json(TagsResponse { tags }))
}

/// GET /api/v1/events/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let categories = EventRepo::distinct_categories(&state.pool).await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// PUT /api/v1/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<EventResponse>> {
    // 1. Load the event to check ownership.
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Event", id))?;

    // 2. Only the owner may modify it.
    if existing.user_id != auth.user_id {
        return Err(AppError::forbidden(
            "You are not allowed to update this event",
        ));
    }

    // 3. Validate whatever fields were supplied.
    validate_event_update(&input)?;

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Event", id))?;

    tracing::info!(event_id = %id, "Event updated");

    Ok(Json(EventResponse::from(event)))
}

/// DELETE /api/v1/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Event", id))?;

    if existing.user_id != auth.user_id {
        return Err(AppError::forbidden(
            "You are not allowed to delete this event",
        ));
    }

    let deleted = EventRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(event_id = %id, "Event deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Event", id))
    }
}
