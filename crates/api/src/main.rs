use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use encuentro_api::config::ServerConfig;
use encuentro_api::email::{EmailConfig, Mailer};
use encuentro_api::router::build_app_router;
use encuentro_api::state::AppState;
use encuentro_api::weather::{WeatherClient, WeatherConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let pool = connect_database().await;

    // Forecast and mail are optional; each comes up only when its env vars
    // are present.
    let weather = WeatherConfig::from_env().map(|weather_config| {
        tracing::info!("Forecast client configured");
        Arc::new(WeatherClient::new(weather_config))
    });
    if weather.is_none() {
        tracing::info!("WEATHER_API_KEY not set, events will be served without forecasts");
    }

    let mailer = EmailConfig::from_env().map(|email_config| {
        tracing::info!(host = %email_config.smtp_host, "SMTP mailer configured");
        Arc::new(Mailer::new(email_config))
    });
    if mailer.is_none() {
        tracing::info!("SMTP_HOST not set, password reset emails disabled");
    }

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        weather,
        mailer,
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Env-filtered fmt subscriber; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encuentro_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, probe, and migrate. Any failure here aborts startup.
async fn connect_database() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = encuentro_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    encuentro_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    encuentro_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    pool
}

/// Resolves when the process receives SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
