//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the location domain.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::LocationId;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A stored location.
///
/// The coordinate is derived from the address fields and is never
/// supplied by clients. Every write re-resolves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Immutable identifier assigned on creation
    pub id: LocationId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Geocoded position of the address fields
    pub coordinate: Coordinate,
}

impl Location {
    /// Free-text address fed to the resolver.
    pub fn address_line(&self) -> String {
        address_line(&self.address, &self.city, &self.state, &self.zip)
    }

    /// Overwrite every field present in the patch.
    ///
    /// The coordinate is left alone; callers must re-resolve it.
    pub fn apply(&mut self, patch: LocationPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(zip) = patch.zip {
            self.zip = zip;
        }
    }
}

/// Fields supplied by a client when creating a location.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl NewLocation {
    /// Free-text address fed to the resolver.
    pub fn address_line(&self) -> String {
        address_line(&self.address, &self.city, &self.state, &self.zip)
    }

    /// Assemble the stored record once an id and coordinate exist.
    pub fn into_location(self, id: LocationId, coordinate: Coordinate) -> Location {
        Location {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            coordinate,
        }
    }
}

/// Partial update of a location. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

fn address_line(address: &str, city: &str, state: &str, zip: &str) -> String {
    format!("{} {} {} {}", address, city, state, zip)
        .trim_matches(' ')
        .to_string()
}
