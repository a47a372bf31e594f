//! Authentication primitives.
//!
//! - `jwt`: token generation and validation
//! - `password`: Argon2 hashing and verification

pub mod jwt;
pub mod password;
