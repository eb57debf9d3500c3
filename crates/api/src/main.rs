use std::net::SocketAddr;
use std::sync::Arc;

use ajfses_core::image_store::ImageStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ajfses_api::bootstrap::seed_admin;
use ajfses_api::config::ServerConfig;
use ajfses_api::router::build_app_router;
use ajfses_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ajfses_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        app_env = %config.app_env,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = ajfses_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    ajfses_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    ajfses_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Image storage ---
    let images = ImageStore::new(config.image_dir.clone());
    images
        .ensure_dirs()
        .await
        .expect("Failed to create image directories");
    tracing::info!(root = %images.root().display(), "Image storage ready");

    // --- Admin seed ---
    if let Some(seed) = &config.admin_seed {
        match seed_admin(&pool, seed).await {
            Ok(true) => tracing::info!(username = %seed.username, "Seeded admin account"),
            Ok(false) => tracing::debug!(username = %seed.username, "Admin account already exists"),
            Err(e) => panic!("Failed to seed admin account: {e}"),
        }
    }

    // --- App state + router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(images),
    };
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

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
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
