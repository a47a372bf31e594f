use std::sync::Arc;

use crate::config::ServerConfig;
use crate::email::Mailer;
use crate::weather::WeatherClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: encuentro_db::DbPool,
    /// Server configuration (JWT secret, CORS, timeouts).
    pub config: Arc<ServerConfig>,
    /// Forecast client; `None` when no weather API key is configured.
    pub weather: Option<Arc<WeatherClient>>,
    /// SMTP mailer for password-reset emails; `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}
