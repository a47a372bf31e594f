//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod event_repo;
pub mod registration_repo;
pub mod user_repo;

pub use event_repo::EventRepo;
pub use registration_repo::RegistrationRepo;
pub use user_repo::UserRepo;
