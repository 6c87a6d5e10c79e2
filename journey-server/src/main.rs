use std::error::Error;

use journey_server::cache::CachedStatsGateway;
use journey_server::config::AppConfig;
use journey_server::gateway::{HttpStatsGateway, MockStatsGateway};
use journey_server::journal::JournalStore;
use journey_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let cache_config = config.cache_config();
    let journal = JournalStore::with_sample_entries();

    // Fixture data stands in for the statistics API when configured
    let state = match &config.mock_data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Using mock statistics data");
            let gateway = MockStatsGateway::new(dir)?;
            AppState::new(CachedStatsGateway::new(gateway, &cache_config), journal)
        }
        None => {
            info!(api_url = %config.api_url, "Using statistics API");
            let gateway = HttpStatsGateway::new(config.gateway_config())?;
            AppState::new(CachedStatsGateway::new(gateway, &cache_config), journal)
        }
    };

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Van journey dashboard listening");
    info!("Open http://{} in your browser", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
