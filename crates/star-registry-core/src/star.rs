//! Star payloads and ownership claims.
//!
//! A star is whatever JSON object the claimant submits. The usual keys
//! (`dec`, `ra`, `story`, `mag`, `cen`) have accessors, but no key is
//! required and unknown keys are kept. Key order is preserved, so a star
//! re-encodes to the same body it was decoded from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

/// A star: sky coordinates plus a free-text story, and any other fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Star(Map<String, Value>);

impl Star {
    /// Create a star with coordinates and a story.
    pub fn new(dec: impl Into<String>, ra: impl Into<String>, story: impl Into<String>) -> Self {
        Self::default()
            .with_field("dec", dec.into())
            .with_field("ra", ra.into())
            .with_field("story", story.into())
    }

    /// Set the magnitude.
    pub fn with_magnitude(self, mag: impl Into<Value>) -> Self {
        self.with_field("mag", mag)
    }

    /// Set the constellation.
    pub fn with_constellation(self, cen: impl Into<Value>) -> Self {
        self.with_field("cen", cen)
    }

    /// Set an arbitrary field, replacing any previous value.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Declination, when present as a string.
    pub fn dec(&self) -> Option<&str> {
        self.get("dec").and_then(Value::as_str)
    }

    /// Right ascension, when present as a string.
    pub fn ra(&self) -> Option<&str> {
        self.get("ra").and_then(Value::as_str)
    }

    /// Free-text story, when present as a string.
    pub fn story(&self) -> Option<&str> {
        self.get("story").and_then(Value::as_str)
    }

    pub fn magnitude(&self) -> Option<&Value> {
        self.get("mag")
    }

    pub fn constellation(&self) -> Option<&Value> {
        self.get("cen")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields, in submission order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Star {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Star {
    type Error = CoreError;

    /// Accepts any JSON object.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(CoreError::DecodingError(format!(
                "star must be a JSON object, got {other}"
            ))),
        }
    }
}

/// The payload of every non-genesis block: who owns which star.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarClaim {
    pub owner: String,
    pub star: Star,
}

impl StarClaim {
    pub fn new(owner: impl Into<String>, star: Star) -> Self {
        Self {
            owner: owner.into(),
            star,
        }
    }
}
