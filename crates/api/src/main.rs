use std::sync::Arc;

use anyhow::Context;

use meditrack_api::{app, config::ApiConfig};
use meditrack_core::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    meditrack_observability::init_with(config.log_format);

    let clock = Arc::new(SystemClock);
    let services = if config.seed {
        app::services::AppServices::seeded(clock)?
    } else {
        app::services::AppServices::new(clock)
    };
    let app = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, seed = config.seed, "listening");

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
