use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gitscope_analyzer::ProfileAggregator;
use gitscope_api::{build_router, AppState};
use gitscope_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    let filter = EnvFilter::from_default_env().add_directive("gitscope=info".parse()?);
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!(?config, "Configuration loaded");

    let aggregator = ProfileAggregator::from_config(&config)?;
    let state = Arc::new(AppState { aggregator });
    let app = build_router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("gitscope API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
