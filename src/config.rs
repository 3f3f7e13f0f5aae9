use serde::Deserialize;

/// Where location records are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum StoreBackend {
    /// MongoDB connection string
    Mongo(String),
    /// SQLite database file, or ":memory:"
    Sqlite(String),
    /// Process memory only
    Memory,
}

impl StoreBackend {
    /// Parse a store URL.
    ///
    /// Accepted forms: `mongodb://…`, `mongodb+srv://…`, `sqlite://<path>`,
    /// `sqlite::memory:` and `memory://`.
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            Ok(Self::Mongo(url.to_string()))
        } else if url == "sqlite::memory:" {
            Ok(Self::Sqlite(":memory:".to_string()))
        } else if let Some(path) = url.strip_prefix("sqlite://") {
            if path.is_empty() {
                return Err(ConfigError::UnsupportedStore(url.to_string()));
            }
            Ok(Self::Sqlite(path.to_string()))
        } else if url == "memory://" || url == "memory" {
            Ok(Self::Memory)
        } else {
            Err(ConfigError::UnsupportedStore(url.to_string()))
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported store url: {0}")]
    UnsupportedStore(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // HTTP server
    pub listen_addr: String,
    pub debug: bool,

    // Storage
    pub store: StoreBackend,
    pub db_name: String,
    pub collection: String,

    // Geocoding provider
    pub geocoder_url: String,
    pub geocoder_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "localhost:8080".to_string(),
            debug: false,
            store: StoreBackend::Memory,
            db_name: "locationdata".to_string(),
            collection: "locations".to_string(),
            geocoder_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            geocoder_api_key: None,
        }
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    config_from(|key| std::env::var(key).ok())
}

fn config_from(var: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let listen_addr = var("LOCATIONS_LISTEN_ADDR")
        .unwrap_or_else(|| "localhost:8080".to_string());

    let debug = var("DEBUG").is_some();

    let store_url = var("LOCATIONS_STORE_URL").unwrap_or_else(|| "memory://".to_string());
    let store = StoreBackend::from_url(&store_url)?;

    let db_name = var("LOCATIONS_DB_NAME").unwrap_or_else(|| "locationdata".to_string());

    let collection = var("LOCATIONS_COLLECTION").unwrap_or_else(|| "locations".to_string());

    let geocoder_url = var("LOCATIONS_GEOCODER_URL")
        .unwrap_or_else(|| "https://maps.googleapis.com/maps/api/geocode/json".to_string());

    let geocoder_api_key = var("LOCATIONS_GEOCODER_API_KEY").filter(|k| !k.is_empty());

    Ok(Config {
        listen_addr,
        debug,
        store,
        db_name,
        collection,
        geocoder_url,
        geocoder_api_key,
    })
}
