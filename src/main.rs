use chat_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, installs logging, and serves the portal.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env before reading; production refuses to start without ALLOWED_ORIGINS.
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise verbose defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chat_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // Pretty output for humans locally, JSON lines for the log aggregator in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. State and Router
    // The route table is built once and shared read-only by every request.
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config);
    tracing::info!(routes = state.routes.routes().len(), "navigation table loaded");
    let app = create_router(state);

    // 5. Server Startup
    // A bind failure is fatal: there is nothing useful to do without a socket.
    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    axum::serve(listener, app).await.expect("server failed");
}
