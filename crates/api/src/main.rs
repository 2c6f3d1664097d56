use std::sync::Arc;

use anyhow::Context;

use sniper_ai::SharedModel;
use sniper_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sniper_observability::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sniper bot anomaly server starting");

    let config = ApiConfig::from_env().context("invalid configuration")?;

    let model = sniper_ai::load_model(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?
        .map(|forest| Arc::new(forest) as SharedModel);
    if model.is_none() {
        tracing::warn!("no model loaded; /predict will answer 500 until restarted with an artifact");
    }

    let app = sniper_api::app::build_app(model);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
