mod config;
mod embedded;
mod records;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{services::ServeDir, trace::TraceLayer};

fn build_router(data_dir: &str) -> Router {
    Router::new()
        .route("/", get(embedded::serve_index))
        .route("/static/{*path}", get(embedded::serve_static))
        .route("/health", get(health_check))
        .nest_service("/data", ServeDir::new(data_dir))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = config::Config::load_or_default();

    // Initialize logging with configured level
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    tracing::info!("Starting LabelView Server");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Host: {}, port: {}", config.server.host, config.server.port);
    tracing::info!("  Data directory: {}", config.server.data_dir);
    tracing::info!("  Log level: {}", config.logging.level);

    records::report_labels_file(&config.server.data_dir);

    let app = build_router(&config.server.data_dir);

    let ip_addr = config.server.host.parse::<std::net::IpAddr>().unwrap_or_else(|e| {
        tracing::warn!("Failed to parse host '{}': {}. Using 0.0.0.0", config.server.host, e);
        [0, 0, 0, 0].into()
    });
    let addr = SocketAddr::from((ip_addr, config.server.port));

    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
