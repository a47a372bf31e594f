pub mod auth;
pub mod events;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                     signup (public)
/// /auth/login                      login (public)
/// /auth/forgot-password            request reset email (public)
/// /auth/reset-password             reset with token (public)
///
/// /users                           list
/// /users/{id}                      get, update, delete (update/delete: owner only)
///
/// /events                          list (filters), create
/// /events/summaries                paginated card listing
/// /events/tags                     distinct tags in use
/// /events/categories               distinct categories in use
/// /events/{id}                     get (with forecast), update, delete (owner only)
/// /events/{id}/register            register, unregister (auth required)
/// /events/{id}/registrations       attendee listing (public)
/// /events/{id}/registrations/me    caller's own registration (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and password reset.
        .nest("/auth", auth::router())
        // User accounts.
        .nest("/users", users::router())
        // Events plus the registration sub-resource.
        .nest("/events", events::router())
}
