//! Compile-time registry of city dataset sources.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a new city requires creating a TOML file in `sources/` and adding
//! a corresponding entry here.

use rental_map_source_models::CitySource;

/// Number of registered city sources. Updated when new sources are
/// added. Enforced by a test.
#[cfg(test)]
const EXPECTED_SOURCE_COUNT: usize = 3;

/// Embedded TOML source definitions.
const SOURCE_TOMLS: &[(&str, &str)] = &[
    ("madrid", include_str!("../sources/madrid.toml")),
    ("barcelona", include_str!("../sources/barcelona.toml")),
    ("mallorca", include_str!("../sources/mallorca.toml")),
];

/// Returns all registered city sources.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught during CI.
#[must_use]
pub fn all_sources() -> Vec<CitySource> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse city source '{name}': {e}"))
        })
        .collect()
}

/// Looks up a registered source by its lowercase city key.
#[must_use]
pub fn find_source(city: &str) -> Option<CitySource> {
    all_sources().into_iter().find(|s| s.city == city)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_sources() {
        let sources = all_sources();
        assert_eq!(
            sources.len(),
            EXPECTED_SOURCE_COUNT,
            "Expected {EXPECTED_SOURCE_COUNT} city sources, found {}. \
             Update EXPECTED_SOURCE_COUNT after adding/removing sources.",
            sources.len()
        );
    }

    #[test]
    fn source_ids_are_unique() {
        let sources = all_sources();
        let mut seen = BTreeSet::new();
        for source in &sources {
            assert!(
                seen.insert(&source.id),
                "Duplicate city source ID: {}",
                source.id
            );
        }
    }

    #[test]
    fn all_sources_have_required_fields() {
        for source in &all_sources() {
            assert!(!source.id.is_empty(), "Source has empty id");
            assert!(
                !source.name.is_empty(),
                "Source {} has empty name",
                source.id
            );
            assert_eq!(
                source.city,
                source.city.to_lowercase(),
                "Source {} city key must be lowercase",
                source.id
            );
            assert!(
                !source.listings_csv.is_empty(),
                "Source {} has empty listings file",
                source.id
            );
            assert!(
                !source.fields.name.is_empty(),
                "Source {} has empty name field",
                source.id
            );
            assert!(
                source.center.lat > 35.0 && source.center.lat < 44.0,
                "Source {} center latitude {} outside Spain",
                source.id,
                source.center.lat
            );
            assert!(
                source.center.lon > -10.0 && source.center.lon < 5.0,
                "Source {} center longitude {} outside Spain",
                source.id,
                source.center.lon
            );
        }
    }

    #[test]
    fn find_source_by_city_key() {
        assert!(find_source("madrid").is_some());
        assert!(find_source("barcelona").is_some());
        assert!(find_source("Madrid").is_none(), "lookup is by lowercase key");
        assert!(find_source("sevilla").is_none());
    }
}
