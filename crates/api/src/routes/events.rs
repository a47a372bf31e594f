//! Route definitions for the `/events` resource, including the
//! registration sub-resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{events, registrations};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// Static segments (`/summaries`, `/tags`, `/categories`) take precedence
/// over the `/{id}` parameter.
///
/// ```text
/// GET    /                         -> list_events (?category, ?tag, ?date, ?name)
/// POST   /                         -> create_event (requires auth)
/// GET    /summaries                -> event_summaries (?page, ?limit)
/// GET    /tags                     -> list_tags
/// GET    /categories               -> list_categories
/// GET    /{id}                     -> get_event (with optional forecast)
/// PUT    /{id}                     -> update_event (owner only)
/// DELETE /{id}                     -> delete_event (owner only)
/// POST   /{id}/register            -> register (requires auth)
/// DELETE /{id}/register            -> unregister (requires auth)
/// GET    /{id}/registrations       -> list_registrations
/// GET    /{id}/registrations/me    -> my_registration (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route("/summaries", get(events::event_summaries))
        .route("/tags", get(events::list_tags))
        .route("/categories", get(events::list_categories))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/{id}/register",
            post(registrations::register).delete(registrations::unregister),
        )
        .route(
            "/{id}/registrations",
            get(registrations::list_registrations),
        )
        .route(
            "/{id}/registrations/me",
            get(registrations::my_registration),
        )
}
