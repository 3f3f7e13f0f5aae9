//! Location Service - geocoded location CRUD over HTTP
//!
//! This is the composition root that wires together all the components.

use location_service::adapters::inbound::ApiServer;
use location_service::adapters::outbound::{
    DashMapLocationRepository, GeocoderConfig, GoogleGeocoder, MongoConfig,
    MongoLocationRepository, SqliteLocationRepository,
};
use location_service::config::{load_config, StoreBackend};
use location_service::domain::ports::{AddressResolver, LocationRepository};
use location_service::LocationService;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!("starting location-service listen={}", cfg.listen_addr);

    // ===== COMPOSITION ROOT =====

    // 1. Location store
    let repository: Arc<dyn LocationRepository> = match &cfg.store {
        StoreBackend::Mongo(url) => {
            let mongo = MongoConfig {
                url: url.clone(),
                database: cfg.db_name.clone(),
                collection: cfg.collection.clone(),
            };
            Arc::new(MongoLocationRepository::connect(&mongo).await?)
        }
        StoreBackend::Sqlite(path) => {
            tracing::info!("SQLite store at {}", path);
            Arc::new(SqliteLocationRepository::open(path)?)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, records are lost on exit");
            Arc::new(DashMapLocationRepository::new())
        }
    };

    // 2. Address resolver
    if cfg.geocoder_api_key.is_none() {
        tracing::warn!("LOCATIONS_GEOCODER_API_KEY not set, geocoder requests carry no key");
    }
    let resolver: Arc<dyn AddressResolver> = Arc::new(GoogleGeocoder::new(GeocoderConfig {
        url: cfg.geocoder_url.clone(),
        api_key: cfg.geocoder_api_key.clone(),
    }));

    // 3. Application service
    let service = Arc::new(LocationService::new(resolver, repository));

    // 4. Inbound adapter
    let server = ApiServer::new(cfg.listen_addr, service);

    server.run().await
}
