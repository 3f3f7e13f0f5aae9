mod dashmap_location_repo;
mod google_geocoder;
mod mongo_location_repo;
mod sqlite_location_repo;

pub use dashmap_location_repo::DashMapLocationRepository;
pub use google_geocoder::{GeocoderConfig, GoogleGeocoder};
pub use mongo_location_repo::{MongoConfig, MongoLocationRepository};
pub use sqlite_location_repo::{SqliteLocationRepository, LOCATIONS_SCHEMA};
