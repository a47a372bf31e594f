use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use encuentro_core::types::DbId;
use encuentro_db::models::registration::{CreateRegistration, Registration, RegistrationDetail};
use encuentro_db::repositories::{EventRepo, RegistrationRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Optional registration details. All fields may be omitted, as may the
/// entire request body.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub whatsapp: Option<String>,
    pub event_date: Option<String>,
    pub payment_link: Option<String>,
}

/// POST /api/v1/events/{id}/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<DbId>,
    body: Option<Json<RegisterRequest>>,
) -> AppResult<(StatusCode, Json<Registration>)> {
    let input = body.map(|Json(b)| b).unwrap_or_default();

    // 1. The event must exist.
    EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::not_found("Event", event_id))?;

    // 2. One registration per user per event.
    if RegistrationRepo::exists(&state.pool, event_id, auth.user_id).await? {
        return Err(AppError::conflict(
            "You are already registered for this event",
        ));
    }

    // 3. Fall back to the profile whatsapp when the request omits one.
    let whatsapp = match input.whatsapp.filter(|w| !w.trim().is_empty()) {
        Some(w) => w,
        None => {
            UserRepo::find_by_id(&state.pool, auth.user_id)
                .await?
                .ok_or(AppError::unauthorized("User no longer exists"))?
                .whatsapp
        }
    };

    let registration = RegistrationRepo::create(
        &state.pool,
        &CreateRegistration {
            event_id,
            user_id: auth.user_id,
            whatsapp,
            event_date: input.event_date,
            payment_link: input.payment_link,
        },
    )
    .await?;

    tracing::info!(event_id = %event_id, user_id = %auth.user_id, "User registered for event");

    Ok((StatusCode::CREATED, Json(registration)))
}

/// DELETE /api/v1/events/{id}/register
pub async fn unregister(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = RegistrationRepo::delete(&state.pool, event_id, auth.user_id).await?;
    if !removed {
        return Err(AppError::not_found("Registration", event_id));
    }

    tracing::info!(event_id = %event_id, user_id = %auth.user_id, "User unregistered from event");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/events/{id}/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<Vec<RegistrationDetail>>> {
    EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::not_found("Event", event_id))?;

    let attendees = RegistrationRepo::list_for_event(&state.pool, event_id).await?;
    Ok(Json(attendees))
}

/// GET /api/v1/events/{id}/registrations/me
pub async fn my_registration(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<RegistrationDetail>> {
    let detail = RegistrationRepo::find_detail(&state.pool, event_id, auth.user_id)
        .await?
        .ok_or(AppError::not_found("Registration", event_id))?;
    Ok(Json(detail))
}
