// src/main.rs

use std::net::SocketAddr;

use concurseiro::config::Config;
use concurseiro::quiz::SessionStore;
use concurseiro::repo::{Repos, seed};
use concurseiro::routes;
use concurseiro::state::AppState;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // In-memory repositories stand in for a database; swap the
    // implementations behind `Repos` to attach a real store.
    let repos = Repos::in_memory();
    if let Err(e) = seed::load_demo_data(&repos).await {
        tracing::error!("Failed to seed demo data: {:?}", e);
    }

    let sessions = SessionStore::new(repos.results.clone());

    // Create AppState
    let state = AppState {
        repos,
        sessions,
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
