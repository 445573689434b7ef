// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use recall_quiz::backend::HttpBackend;
use recall_quiz::config::Config;
use recall_quiz::routes;
use recall_quiz::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "recall-quiz.log");
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

    tracing::info!("Using memory backend at {}", config.backend_url);
    if config.answer_telemetry {
        tracing::info!("Per-answer telemetry enabled");
    }
    if let Some(seed) = config.quiz_seed {
        tracing::warn!("Quiz RNG seeded with {}, shuffles are deterministic", seed);
    }

    let backend = Arc::new(HttpBackend::new(config.backend_url.clone()));
    let addr = config.bind_addr;
    let state = AppState::new(backend, config);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");
    tracing::info!("Listening on {}", addr);

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}
