//! Representative points for boundary polygons.
//!
//! The centroid is the planar arithmetic mean of the exterior ring of
//! the first polygon, a documented simplification of an area-weighted
//! centroid that is acceptable at city scale for marker placement. Results are
//! cached per `(city, canonical_name)` for the process lifetime; the
//! cache is owned by the calculator instance so tests can construct
//! isolated ones.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use geo::MultiPolygon;
use rental_map_geography_models::{BoundaryFeature, Centroid};
use rental_map_source_models::CityCenter;

/// Computes and caches boundary centroids.
///
/// The cache is append-only for the process lifetime; entries are never
/// invalidated because boundary files are read-only inputs.
#[derive(Debug, Default)]
pub struct CentroidCalculator {
    cache: BTreeMap<(String, String), Option<Centroid>>,
    computations: u64,
}

impl CentroidCalculator {
    /// Creates a calculator with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the centroid for a boundary, computing it on first use.
    ///
    /// Returns `None` when the geometry has no usable exterior ring
    /// (fewer than 3 coordinate pairs); callers substitute a
    /// deterministic placeholder via [`placeholder_position`].
    pub fn centroid_for(&mut self, feature: &BoundaryFeature) -> Option<Centroid> {
        let key = (feature.city.clone(), feature.canonical_name.clone());

        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let centroid = exterior_ring_mean(&feature.geometry);
        if centroid.is_none() {
            log::debug!(
                "No centroid available for {}/{}",
                feature.city,
                feature.canonical_name
            );
        }

        self.computations += 1;
        self.cache.insert(key, centroid);
        centroid
    }

    /// Number of geometries actually computed (cache misses). Exposed
    /// for tests and diagnostics.
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }

    /// Number of cached entries, including "no centroid" results.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Planar mean of the exterior ring of the first polygon.
///
/// The ring is used verbatim as parsed, closing coordinate included.
fn exterior_ring_mean(geometry: &MultiPolygon<f64>) -> Option<Centroid> {
    let polygon = geometry.0.first()?;
    let ring = &polygon.exterior().0;

    if ring.len() < 3 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = ring.len() as f64;
    let (lon_sum, lat_sum) = ring
        .iter()
        .fold((0.0, 0.0), |(lon, lat), coord| (lon + coord.x, lat + coord.y));

    Some(Centroid {
        lat: lat_sum / count,
        lon: lon_sum / count,
    })
}

/// Deterministic placeholder position for a neighbourhood with no
/// usable centroid.
///
/// Places markers on a small circle around the city center, indexed by
/// a stable ordinal so repeated runs produce identical output. The
/// radius steps through three bands to keep adjacent markers from
/// overlapping.
#[must_use]
pub fn placeholder_position(center: CityCenter, ordinal: usize, total: usize) -> Centroid {
    #[allow(clippy::cast_precision_loss)]
    let angle = ordinal as f64 / total.max(1) as f64 * TAU;
    #[allow(clippy::cast_precision_loss)]
    let radius = 0.015 + (ordinal % 3) as f64 * 0.008;

    Centroid {
        lat: radius.mul_add(angle.cos(), center.lat),
        lon: radius.mul_add(angle.sin(), center.lon),
    }
}
