//! One recomputation pass of the dashboard pipeline.
//!
//! Every step degrades instead of aborting: a missing listings file
//! yields empty tables plus a message, a missing boundary file skips
//! the map section, and the summary metrics always print (falling back
//! to the documented constants when data is absent).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rental_map_analytics::{aggregate, export, metrics, sustainability};
use rental_map_analytics_models::NeighborhoodAggregate;
use rental_map_geography::boundaries::BoundaryCatalog;
use rental_map_geography::centroid::{self, CentroidCalculator};
use rental_map_geography_models::{BoundaryFeature, Centroid};
use rental_map_listing_models::{Listing, SaturationTier};
use rental_map_neighborhood::matching::join_names;
use rental_map_neighborhood::normalize::canonical_name;
use rental_map_source::catalog::Catalog;
use rental_map_source_models::CitySource;

/// Number of neighbourhood markers shown per city.
const MARKER_LIMIT: usize = 15;

/// Session-lifetime state: the memoized load catalogs and the centroid
/// cache. Everything else is recomputed fresh on every pass.
pub struct Session {
    catalog: Catalog,
    boundaries: BoundaryCatalog,
    centroids: CentroidCalculator,
    data_dir: PathBuf,
}

impl Session {
    /// Creates a session rooted at the given data directory.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            catalog: Catalog::new(&data_dir),
            boundaries: BoundaryCatalog::new(),
            centroids: CentroidCalculator::new(),
            data_dir,
        }
    }

    /// Runs one synchronous pass for a city and prints the results.
    ///
    /// Never aborts: every failure prints a message and the pass
    /// continues with whatever data is available.
    pub fn run_pass(&mut self, source: &CitySource, export_path: Option<&Path>) {
        log::info!("Recomputation pass for {}", source.city);

        println!();
        println!("=== {} ===", source.name);

        let all_listings = self.load_listings(source);
        let city_listings: Vec<Listing> = all_listings
            .iter()
            .filter(|l| l.city == source.city)
            .cloned()
            .collect();

        // Overall summary across every city in the dataset.
        let all_cities = aggregate::aggregate_by_city(&all_listings);
        let all_neighbourhoods = aggregate::aggregate_by_neighbourhood(&all_listings);
        let summary = metrics::summary_metrics(&all_cities, &all_neighbourhoods, &all_listings);

        println!();
        println!("Overall summary (all cities):");
        for (kind, metric) in summary.entries() {
            let marker = if metric.fallback { " (fallback)" } else { "" };
            println!("  {kind}: {:.1}{marker}", metric.value);
        }

        // Per-city tables.
        let city_rows = aggregate::aggregate_by_neighbourhood(&city_listings);
        if city_rows.is_empty() {
            println!();
            println!("No listings available for {}.", source.city);
        } else {
            self.print_city_section(source, &city_rows);
        }

        if let Some(city) = all_cities.iter().find(|c| c.city == source.city) {
            let indicators = sustainability::indicators_for_city(city, &all_neighbourhoods);
            println!();
            println!("Sustainability indicators:");
            println!(
                "  housing pressure {:.1} | concentration {:.2} | accessibility {:.1}%{}",
                indicators.housing_pressure,
                indicators.tourist_concentration,
                indicators.economic_accessibility,
                if indicators.fallback {
                    " (sector reference values)"
                } else {
                    ""
                }
            );
        }

        if let Some(path) = export_path {
            write_export(&city_rows, path);
        }
    }

    /// Loads the unified listings table, degrading to an empty set with
    /// a message when it is unavailable.
    fn load_listings(&mut self, source: &CitySource) -> Vec<Listing> {
        match self.catalog.listings_for(source) {
            Ok(loaded) => {
                println!(
                    "Loaded {} listings ({} rows dropped by cleaning).",
                    loaded.listings.len(),
                    loaded.report.dropped_total()
                );
                loaded.listings.clone()
            }
            Err(e) => {
                println!("Listings unavailable: {e}");
                Vec::new()
            }
        }
    }

    /// Prints the neighbourhood table, tier breakdown, join coverage,
    /// and marker positions for one city.
    fn print_city_section(&mut self, source: &CitySource, city_rows: &[NeighborhoodAggregate]) {
        println!();
        println!(
            "{} neighbourhoods, {} listings in {}.",
            city_rows.len(),
            city_rows.iter().map(|r| r.total_listings).sum::<u64>(),
            source.city
        );

        let mut tier_counts: BTreeMap<SaturationTier, usize> = BTreeMap::new();
        for row in city_rows {
            *tier_counts.entry(row.saturation_tier()).or_default() += 1;
        }
        println!();
        println!("Saturation tiers:");
        for tier in SaturationTier::all() {
            println!(
                "  {tier}: {}",
                tier_counts.get(tier).copied().unwrap_or_default()
            );
        }

        let boundary_set = self.load_boundaries(source);

        let report = join_names(
            city_rows.iter().map(|r| r.neighbourhood.as_str()),
            boundary_set.iter().map(|b| b.name.as_str()),
        );
        println!();
        println!("Boundary join: {}.", report.coverage());
        if !report.aggregate_only.is_empty() {
            println!("  Without polygons: {}", report.aggregate_only.join(", "));
        }

        self.print_markers(source, city_rows, &boundary_set);
    }

    /// Loads the city's boundary polygons, degrading to an empty set.
    fn load_boundaries(&mut self, source: &CitySource) -> Vec<BoundaryFeature> {
        let Some(file) = &source.boundaries_geojson else {
            println!("No boundary file registered for {}.", source.city);
            return Vec::new();
        };

        let path = self.data_dir.join(file);
        match self
            .boundaries
            .boundaries_for(&path, &source.city, &source.fields)
        {
            Ok(loaded) => loaded.as_ref().clone(),
            Err(e) => {
                println!("Boundaries unavailable: {e}");
                Vec::new()
            }
        }
    }

    /// Prints marker positions for the largest neighbourhoods, using
    /// real centroids where a polygon matched and deterministic
    /// placeholders otherwise.
    fn print_markers(
        &mut self,
        source: &CitySource,
        city_rows: &[NeighborhoodAggregate],
        boundary_set: &[BoundaryFeature],
    ) {
        let by_canonical: BTreeMap<&str, &BoundaryFeature> = boundary_set
            .iter()
            .map(|b| (b.canonical_name.as_str(), b))
            .collect();

        let mut top: Vec<&NeighborhoodAggregate> = city_rows.iter().collect();
        top.sort_by(|a, b| {
            b.total_listings
                .cmp(&a.total_listings)
                .then_with(|| a.neighbourhood.cmp(&b.neighbourhood))
        });
        top.truncate(MARKER_LIMIT);

        println!();
        println!("Markers (top {} by listings):", top.len());

        let mut fallback_count = 0usize;
        for row in &top {
            let position = by_canonical
                .get(canonical_name(&row.neighbourhood).as_str())
                .and_then(|feature| self.centroids.centroid_for(feature));

            let (position, note): (Centroid, &str) = match position {
                Some(centroid) => (centroid, ""),
                None => {
                    let placeholder =
                        centroid::placeholder_position(source.center, fallback_count, top.len());
                    fallback_count += 1;
                    (placeholder, " (placeholder)")
                }
            };

            println!(
                "  {} [{}] - {} listings at ({:.4}, {:.4}){note}",
                row.neighbourhood,
                row.saturation_tier(),
                row.total_listings,
                position.lat,
                position.lon,
            );
        }
    }
}

/// Writes the filtered neighbourhood table to a CSV file. Failures
/// print a message, never abort the session.
fn write_export(rows: &[NeighborhoodAggregate], path: &Path) {
    match export::export_csv(rows) {
        Ok(csv_text) => {
            if let Err(e) = std::fs::write(path, csv_text) {
                println!("Could not write export to {}: {e}", path.display());
            } else {
                println!();
                println!("Exported {} rows to {}.", rows.len(), path.display());
            }
        }
        Err(e) => println!("Export failed: {e}"),
    }
}
