use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verdant_api::config::ServerConfig;
use verdant_api::router::build_app_router;
use verdant_api::{background, state};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verdant_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = verdant_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    verdant_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    verdant_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(verdant_events::EventBus::default());
    tracing::info!("Event bus created");

    // Email delivery is optional; without SMTP configuration the fan-out
    // still writes in-app notifications.
    let email = verdant_events::EmailConfig::from_env().map(verdant_events::EmailDelivery::new);
    tracing::info!(email_enabled = email.is_some(), "Notification fan-out configured");
    let fanout = verdant_events::NotificationFanout::new(email);

    // Spawn event persistence (writes all events, then fans out notifications).
    let persistence_handle = tokio::spawn(verdant_events::EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
        fanout,
    ));

    // Spawn the daily maintenance sweep (session cleanup, due reminders).
    let maintenance_cancel = tokio_util::sync::CancellationToken::new();
    let maintenance_handle = tokio::spawn(background::maintenance::run(
        pool.clone(),
        Arc::clone(&event_bus),
        maintenance_cancel.clone(),
    ));

    tracing::info!("Background services started (persistence, maintenance)");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
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

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let join_timeout = Duration::from_secs(config.shutdown_timeout_secs);

    // Stop the maintenance sweep.
    maintenance_cancel.cancel();
    let _ = tokio::time::timeout(join_timeout, maintenance_handle).await;
    tracing::info!("Maintenance job stopped");

    // Drop the event bus sender to close the broadcast channel, which
    // signals the persistence loop to drain and exit.
    drop(event_bus);
    let _ = tokio::time::timeout(join_timeout, persistence_handle).await;
    tracing::info!("Event persistence shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
