//! Loads neighbourhood boundary features from `GeoJSON` files.
//!
//! Uses the source's [`BoundaryFieldMapping`] to extract the
//! neighbourhood name from each feature's properties. Features with a
//! missing name or a non-polygon geometry are skipped with a log line,
//! never a failure. Loads are memoized per resolved file path for the
//! process lifetime.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use geo::MultiPolygon;
use geojson::GeoJson;
use rental_map_geography_models::BoundaryFeature;
use rental_map_neighborhood::normalize::canonical_name;
use rental_map_source_models::BoundaryFieldMapping;

use crate::GeographyError;

/// A cache of loaded boundary sets keyed by resolved file path.
#[derive(Debug, Default)]
pub struct BoundaryCatalog {
    boundaries: BTreeMap<PathBuf, Arc<Vec<BoundaryFeature>>>,
}

impl BoundaryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the boundaries in a file, loading it on first use and
    /// reusing the cached result after.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::DataUnavailable`] when the file is
    /// missing, or a parse error when it cannot be read.
    pub fn boundaries_for(
        &mut self,
        path: &Path,
        city: &str,
        fields: &BoundaryFieldMapping,
    ) -> Result<Arc<Vec<BoundaryFeature>>, GeographyError> {
        if let Some(cached) = self.boundaries.get(path) {
            log::debug!("Boundary catalog hit for {}", path.display());
            return Ok(Arc::clone(cached));
        }

        let loaded = Arc::new(load_boundaries(path, city, fields)?);
        self.boundaries.insert(path.to_path_buf(), Arc::clone(&loaded));
        Ok(loaded)
    }
}

/// Loads and parses one city's boundary file.
///
/// # Errors
///
/// Returns [`GeographyError::DataUnavailable`] when the file does not
/// exist, or a parse error when it is not valid `GeoJSON`.
pub fn load_boundaries(
    path: &Path,
    city: &str,
    fields: &BoundaryFieldMapping,
) -> Result<Vec<BoundaryFeature>, GeographyError> {
    if !path.is_file() {
        return Err(GeographyError::DataUnavailable {
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path)?;
    let boundaries = parse_boundaries(&raw, city, fields)?;

    log::info!(
        "Loaded {} boundaries for {city} from {}",
        boundaries.len(),
        path.display()
    );

    Ok(boundaries)
}

/// Parses a `GeoJSON` feature collection into boundary features.
///
/// # Errors
///
/// Returns [`GeographyError::GeoJson`] if the text is not valid
/// `GeoJSON`.
pub fn parse_boundaries(
    raw: &str,
    city: &str,
    fields: &BoundaryFieldMapping,
) -> Result<Vec<BoundaryFeature>, GeographyError> {
    let geojson: GeoJson = raw.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        log::warn!("Boundary file for {city} is not a FeatureCollection; skipping");
        return Ok(Vec::new());
    };

    let mut boundaries = Vec::new();

    for feature in collection.features {
        let Some(name) = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(&fields.name))
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            log::debug!("Skipping boundary feature without a '{}' name", fields.name);
            continue;
        };

        let Some(geometry) = feature.geometry.and_then(to_multi_polygon) else {
            log::debug!("Skipping boundary '{name}' without polygon geometry");
            continue;
        };

        boundaries.push(BoundaryFeature {
            city: city.to_string(),
            name: name.to_string(),
            canonical_name: canonical_name(name),
            geometry,
        });
    }

    Ok(boundaries)
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`]. Single
/// polygons become one-member multi-polygons; other geometry types are
/// rejected.
fn to_multi_polygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}
