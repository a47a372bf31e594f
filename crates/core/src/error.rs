//! Domain error taxonomy.
//!
//! Handlers map these onto HTTP status codes in the API crate; repositories
//! and domain rules return them directly.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity (event, user, registration) does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain rule (tag limit, missing date slot, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation collides with existing state (duplicate email,
    /// already-registered attendee, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not the owner of the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
