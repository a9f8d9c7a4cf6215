mod arcgis;
mod error;
mod resolver;

pub use arcgis::ArcGisProvider;
pub use error::GeocodingError;
pub use resolver::GeocodeResolver;
#[cfg(test)]
pub(crate) use resolver::testing;

use crate::domain::{NormalizedAddress, Point};
use std::collections::HashMap;
use std::future::Future;

/// Provider `(x, y)` position, x is longitude and y is latitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

/// One possible match for a geocoding query.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Candidate {
    pub location: Location,
    // Metadata is provider-specific: a value of an unexpected type is dropped, not fatal
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<f64>,
    /// The requested out fields.
    #[serde(default, deserialize_with = "lenient")]
    pub attributes: HashMap<String, serde_json::Value>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl Candidate {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            location: Location { x, y },
            address: None,
            score: None,
            attributes: HashMap::new(),
        }
    }

    pub fn point(&self) -> Point {
        Point::from_xy(self.location.x, self.location.y)
    }

    pub fn address_type(&self) -> Option<&str> {
        self.attributes.get("Addr_type").and_then(|v| v.as_str())
    }
}

/// A geocoding service that resolves a single-line address to candidates.
pub trait GeocodingProvider: Send + Sync + 'static {
    /// Performs exactly one lookup. Candidates are in provider order, best match first.
    fn find_address_candidates(
        &self,
        address: &NormalizedAddress,
    ) -> impl Future<Output = Result<Vec<Candidate>, GeocodingError>> + Send;
}
