//! Domain types and rules shared across the backend crates.
//!
//! Everything in this crate is pure (no I/O, no database access) so it can be
//! used by the API layer, the repository layer, and tests alike.

pub mod error;
pub mod payment;
pub mod slots;
pub mod tags;
pub mod types;
