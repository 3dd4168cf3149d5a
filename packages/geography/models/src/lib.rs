#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighbourhood boundary and centroid types.
//!
//! These types represent the polygon side of the choropleth join: named
//! boundary geometries per city and the representative points derived
//! from them.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// A named neighbourhood boundary loaded from a city's polygon file.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    /// Lowercase city key this boundary belongs to.
    pub city: String,
    /// Neighbourhood name as spelled in the boundary file.
    pub name: String,
    /// Canonical form of [`Self::name`], computed once at load.
    pub canonical_name: String,
    /// Polygon or multi-polygon geometry. Single polygons are stored as
    /// a one-member multi-polygon.
    pub geometry: MultiPolygon<f64>,
}

/// A representative point for a boundary, in decimal degrees.
///
/// This is the planar mean of the exterior ring of the first polygon, a
/// documented simplification of a true area-weighted centroid that is
/// acceptable at city scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Centroid {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}
