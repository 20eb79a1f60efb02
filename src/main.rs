mod config;
mod errors;
mod fields;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod views;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use crate::{config::Config, services::ApiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;
    let api = ApiClient::new(&config.api.base_url);
    tracing::info!("Using REST API at {}", api.base_url());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = routes::build_router(api, config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
