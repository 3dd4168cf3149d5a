#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City dataset source definition types.
//!
//! Defines the TOML schema for per-city data sources: where the listings
//! table and the neighbourhood boundary file live, how to read boundary
//! features, and the city-center anchor used for deterministic marker
//! fallbacks.

use serde::{Deserialize, Serialize};

/// A city dataset source, deserialized from TOML.
///
/// Each source describes one city's listings table and (optionally) its
/// neighbourhood boundary polygons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySource {
    /// Unique source identifier (e.g. `"madrid"`).
    pub id: String,
    /// Human-readable name (e.g. "Madrid short-term rental listings").
    pub name: String,
    /// Lowercase city key, as stored on every listing and aggregate.
    pub city: String,
    /// File name of the listings CSV under the data directory.
    pub listings_csv: String,
    /// File name of the neighbourhood boundary `GeoJSON`, if one exists.
    pub boundaries_geojson: Option<String>,
    /// Field mapping for extracting boundary names.
    pub fields: BoundaryFieldMapping,
    /// City-center anchor for deterministic placeholder positions.
    pub center: CityCenter,
}

impl CitySource {
    /// Returns the source identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the lowercase city key.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Field mapping for extracting the neighbourhood name from boundary
/// features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryFieldMapping {
    /// Property field containing the neighbourhood name
    /// (`"neighbourhood"` in the published boundary files).
    pub name: String,
}

/// A city-center coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityCenter {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}
