#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate row types, summary metric types, and the declarative
//! fallback table.
//!
//! Every fallback constant and valid range lives in one place
//! ([`MetricSpec::table`]) instead of being scattered through the
//! consumers. A metric always carries a flag saying whether its value
//! was computed or substituted, so the distinction is never lost.

use rental_map_listing_models::SaturationTier;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// KPI row for one (city, neighbourhood) group.
///
/// Fully derived from the current listing set; recomputed fresh on
/// every data load, never edited in place. The field order here is the
/// column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodAggregate {
    /// Lowercase city key.
    pub city: String,
    /// Neighbourhood name as spelled in the listings (free text; raw
    /// spelling variants stay distinct at this stage).
    pub neighbourhood: String,
    /// Number of listings in the group.
    pub total_listings: u64,
    /// Listings classified as entire homes.
    pub entire_home_count: u64,
    /// `entire_home_count / total_listings × 100`, 0 for an empty group.
    pub ratio_entire_home_pct: f64,
    /// Mean nightly price over the group's listings, 0 when none.
    pub mean_price: f64,
    /// Mean `availability_365`, or the documented default when no
    /// listing in the group reports availability.
    pub mean_availability: f64,
    /// Mean listing latitude, 0 when no listing has coordinates.
    pub mean_latitude: f64,
    /// Mean listing longitude, 0 when no listing has coordinates.
    pub mean_longitude: f64,
}

impl NeighborhoodAggregate {
    /// Saturation tier for this neighbourhood's entire-home ratio.
    #[must_use]
    pub fn saturation_tier(&self) -> SaturationTier {
        SaturationTier::from_ratio(self.ratio_entire_home_pct)
    }
}

/// KPI row for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityAggregate {
    /// Lowercase city key.
    pub city: String,
    /// Number of listings in the city.
    pub total_listings: u64,
    /// Listings classified as entire homes.
    pub entire_home_count: u64,
    /// `entire_home_count / total_listings × 100`, 0 for an empty group.
    pub ratio_entire_home_pct: f64,
    /// Mean nightly price, 0 when no listings.
    pub mean_price: f64,
    /// Mean `availability_365`, or the documented default when absent.
    pub mean_availability: f64,
    /// Occupancy estimate derived from availability:
    /// `max(0, 100 − mean_availability/365 × 100)`.
    pub estimated_occupancy_pct: f64,
    /// Distinct raw neighbourhood spellings observed in the city.
    pub barrios_count: u64,
}

/// The dashboard-level summary metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricKind {
    /// Total listings across all cities.
    TotalListings,
    /// Headline mean nightly price in euros.
    MeanPrice,
    /// Neighbourhoods whose entire-home ratio exceeds the critical
    /// threshold.
    CriticalNeighbourhoods,
    /// Unweighted mean entire-home ratio across cities.
    OverallRatio,
    /// Mean estimated occupancy percentage.
    MeanOccupancy,
    /// Estimated direct economic impact, in millions of euros per year.
    EconomicImpact,
}

/// Default value and valid range for one summary metric.
///
/// A computed value outside `[min, max]` (or undefined) is replaced by
/// `default` and flagged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpec {
    /// Which metric this spec governs.
    pub kind: MetricKind,
    /// Substitute shown when the computation is unusable.
    pub default: f64,
    /// Smallest plausible value, inclusive.
    pub min: f64,
    /// Largest plausible value, inclusive.
    pub max: f64,
}

impl MetricSpec {
    /// The single configuration table of fallback constants and valid
    /// ranges, based on official sector figures for Spain.
    #[must_use]
    pub const fn table() -> &'static [Self] {
        &[
            Self {
                kind: MetricKind::TotalListings,
                default: 15_000.0,
                min: 1_000.0,
                max: 100_000.0,
            },
            Self {
                kind: MetricKind::MeanPrice,
                default: 85.0,
                min: 30.0,
                max: 300.0,
            },
            Self {
                kind: MetricKind::CriticalNeighbourhoods,
                default: 5.0,
                min: 0.0,
                max: 50.0,
            },
            Self {
                kind: MetricKind::OverallRatio,
                default: 45.0,
                min: 20.0,
                max: 95.0,
            },
            Self {
                kind: MetricKind::MeanOccupancy,
                default: 65.5,
                min: 40.0,
                max: 90.0,
            },
            Self {
                kind: MetricKind::EconomicImpact,
                default: 750.0,
                min: 50.0,
                max: 5_000.0,
            },
        ]
    }

    /// Returns the spec for one metric.
    ///
    /// # Panics
    ///
    /// Never in practice: the table covers every [`MetricKind`],
    /// enforced by a test.
    #[must_use]
    pub fn for_kind(kind: MetricKind) -> Self {
        *Self::table()
            .iter()
            .find(|spec| spec.kind == kind)
            .unwrap_or_else(|| panic!("No fallback spec for metric {kind}"))
    }

    /// Whether a computed value is usable under this spec.
    #[must_use]
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// One summary metric value plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// The value shown to the user. Always present and in range.
    pub value: f64,
    /// `true` when the value is the documented fallback rather than a
    /// computation over real data.
    pub fallback: bool,
}

impl Metric {
    /// A metric computed from real data.
    #[must_use]
    pub const fn computed(value: f64) -> Self {
        Self {
            value,
            fallback: false,
        }
    }

    /// A substituted fallback value.
    #[must_use]
    pub const fn substituted(value: f64) -> Self {
        Self {
            value,
            fallback: true,
        }
    }
}

/// The full summary block consumed by the dashboard header.
///
/// Every field is always present; empty inputs produce fallbacks, never
/// missing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    /// Total listings across all cities.
    pub total_listings: Metric,
    /// Headline mean nightly price in euros.
    pub mean_price: Metric,
    /// Count of critical neighbourhoods (ratio above 70%).
    pub critical_neighbourhoods: Metric,
    /// Unweighted mean entire-home ratio across cities (a documented
    /// simplification: a listing-weighted mean would differ).
    pub overall_ratio: Metric,
    /// Mean estimated occupancy percentage.
    pub mean_occupancy: Metric,
    /// Estimated direct economic impact, millions of euros per year.
    pub economic_impact_m_eur: Metric,
}

impl SummaryMetrics {
    /// Iterates the metrics with their kinds, in table order.
    #[must_use]
    pub const fn entries(&self) -> [(MetricKind, Metric); 6] {
        [
            (MetricKind::TotalListings, self.total_listings),
            (MetricKind::MeanPrice, self.mean_price),
            (MetricKind::CriticalNeighbourhoods, self.critical_neighbourhoods),
            (MetricKind::OverallRatio, self.overall_ratio),
            (MetricKind::MeanOccupancy, self.mean_occupancy),
            (MetricKind::EconomicImpact, self.economic_impact_m_eur),
        ]
    }
}

/// Per-city sustainability proxies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityIndicators {
    /// Lowercase city key.
    pub city: String,
    /// Listings per estimated resident population, percent (capped).
    pub housing_pressure: f64,
    /// Coefficient of variation of per-barrio listing counts (capped).
    pub tourist_concentration: f64,
    /// Cost of a 3-night stay as a share of the mean monthly salary,
    /// percent (capped).
    pub economic_accessibility: f64,
    /// `true` when sector reference constants were substituted because
    /// the city had no usable data.
    pub fallback: bool,
}
