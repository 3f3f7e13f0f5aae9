//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier of a stored location.
///
/// A document-database object id, rendered on the wire as 24 lowercase
/// hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(ObjectId);

impl LocationId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a 24 character hex string.
    ///
    /// Returns None for anything else, so a malformed id can never reach a store.
    ///
    /// # Examples
    /// ```
    /// use location_service::domain::value_objects::LocationId;
    ///
    /// assert!(LocationId::parse("5632c7d1e4b0e1a8c8b4a3f2").is_some());
    /// assert!(LocationId::parse("not-an-id").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        ObjectId::parse_str(s).ok().map(Self)
    }

    /// The underlying object id.
    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    /// Lowercase hex representation.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for LocationId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// ObjectId's own serde form is `{"$oid": ...}`; the API wants a bare string.
impl Serialize for LocationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid location id: {}", s)))
    }
}
