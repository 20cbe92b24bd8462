use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use apify_client::ApifyClient;
use hopsight_common::Config;
use hopsight_server::source::ApifySource;
use hopsight_server::{tools, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting hopsight-server");

    let config = Config::from_env();
    let client = ApifyClient::with_request_delay(
        config.apify_token.clone(),
        Duration::from_millis(config.request_delay_ms),
    );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    let state = Arc::new(AppState {
        source: Arc::new(ApifySource::new(client)),
        config,
    });

    let app = tools::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
