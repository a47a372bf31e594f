//! Request middleware.
//!
//! - `auth`: JWT bearer-token extractor ([`auth::AuthUser`])

pub mod auth;
