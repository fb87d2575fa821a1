use std::net::SocketAddr;
use std::sync::Arc;

use inkpost_db::store::{MemoryStore, PgStore, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpost_api::auth::password::PasswordHasher;
use inkpost_api::config::ServerConfig;
use inkpost_api::router::build_app_router;
use inkpost_api::seed;
use inkpost_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpost_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Password hasher ---
    let hasher = PasswordHasher::new(config.password_hash).expect("Invalid password hash cost");
    hasher
        .self_check()
        .expect("Password hasher self-check failed");
    tracing::info!(cost = ?config.password_hash, "Password hasher ready");

    // --- Store ---
    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            let pool = inkpost_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            inkpost_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            inkpost_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    // --- App state ---
    let state = AppState {
        store,
        hasher: Arc::new(hasher),
        config: Arc::new(config.clone()),
    };

    // --- Startup data ---
    if let Some(admin) = &config.bootstrap_admin {
        seed::ensure_bootstrap_admin(&state, admin)
            .await
            .expect("Failed to create bootstrap admin");
    }
    if config.seed_demo_data {
        seed::seed_demo_data(&state)
            .await
            .expect("Failed to seed demo data");
    }

    // --- Router ---
    let app = build_app_router(state);

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

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
