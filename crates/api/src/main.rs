use std::sync::Arc;

use anyhow::Context;

use catalog_infra::{config::AppConfig, JsonFileStore, ProductRepository, ProductStore};

use catalog_api::app::services::AppServices;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let store: Arc<dyn ProductStore> = Arc::new(JsonFileStore::new(&config.data_path));
    let services = AppServices::new(
        ProductRepository::new(store),
        config.data_path.display().to_string(),
    );
    let app = catalog_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        data_path = %config.data_path.display(),
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
