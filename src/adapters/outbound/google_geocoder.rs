//! Google Geocoder
//!
//! Implements AddressResolver using the Google Maps Geocoding API
//! (or anything that speaks its JSON response format).

use crate::domain::entities::Coordinate;
use crate::domain::ports::{AddressResolver, ResolveError};
use async_trait::async_trait;
use serde::Deserialize;

/// Status value the provider uses for a successful lookup.
const STATUS_OK: &str = "OK";

/// Geocoder connection configuration.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Endpoint URL (e.g., https://maps.googleapis.com/maps/api/geocode/json)
    pub url: String,
    /// API key sent as the `key` query parameter
    pub api_key: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            api_key: None,
        }
    }
}

/// Provider response body.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Geocoding-API-backed address resolver.
///
/// Every call issues one GET request; results are not cached and
/// failures are not retried.
pub struct GoogleGeocoder {
    config: GeocoderConfig,
    client: reqwest::Client,
}

impl GoogleGeocoder {
    /// Create a new geocoder with the given configuration.
    pub fn new(config: GeocoderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Interpret a provider response body.
    fn parse_response(response: GeocodeResponse) -> Result<Coordinate, ResolveError> {
        if response.status != STATUS_OK {
            return Err(ResolveError::InvalidAddress(response.status));
        }

        let first = response.results.into_iter().next().ok_or_else(|| {
            ResolveError::MalformedResponse("status OK without results".to_string())
        })?;

        Ok(Coordinate::new(
            first.geometry.location.lat,
            first.geometry.location.lng,
        ))
    }
}

#[async_trait]
impl AddressResolver for GoogleGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        let mut request = self.client.get(&self.config.url).query(&[("address", address)]);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key)]);
        }

        tracing::debug!("geocoding address={:?} url={}", address, self.config.url);

        let response = request
            .send()
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::Transport(format!(
                "geocoder returned {} - {}",
                status, body
            )));
        }

        let data: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| ResolveError::MalformedResponse(e.to_string()))?;

        let result = Self::parse_response(data);
        match &result {
            Ok(point) => tracing::debug!(
                "geocoded {:?} -> lat={} lng={}",
                address,
                point.latitude,
                point.longitude
            ),
            Err(e) => tracing::debug!("geocoding {:?} failed: {}", address, e),
        }
        result
    }
}
