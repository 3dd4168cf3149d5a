//! Derived dashboard summary metrics.
//!
//! The dashboard policy is to never show an empty or undefined metric:
//! every output value is either a computation over real data or the
//! documented fallback constant from [`MetricSpec::table`], and the two
//! cases are distinguished by the [`Metric::fallback`] flag. Each
//! substitution is also logged so it is visible in diagnostics.

use rental_map_analytics_models::{
    CityAggregate, Metric, MetricKind, MetricSpec, NeighborhoodAggregate, SummaryMetrics,
};
use rental_map_listing_models::Listing;

/// A neighbourhood whose entire-home ratio exceeds this percentage
/// counts as critical for the headline alert.
pub const CRITICAL_RATIO_THRESHOLD_PCT: f64 = 70.0;

/// Interior price band used for the headline mean price, excluding the
/// long tails that survive the loader's hard ceiling.
pub const HEADLINE_PRICE_BAND: (f64, f64) = (10.0, 500.0);

/// Operating days per year assumed by the economic impact estimate
/// (excludes maintenance closures).
pub const OPERATING_DAYS_PER_YEAR: f64 = 280.0;

/// Multiplier from accommodation spend to total tourist spend.
pub const TOTAL_SPEND_MULTIPLIER: f64 = 1.8;

/// Computes the full summary block from the current aggregates and
/// listing set.
///
/// All six metrics are always present; absent or implausible inputs
/// produce flagged fallbacks (see [`MetricSpec::table`]).
#[must_use]
pub fn summary_metrics(
    cities: &[CityAggregate],
    neighbourhoods: &[NeighborhoodAggregate],
    listings: &[Listing],
) -> SummaryMetrics {
    let total_input = if cities.is_empty() {
        None
    } else {
        let sum: u64 = cities.iter().map(|c| c.total_listings).sum();
        #[allow(clippy::cast_precision_loss)]
        let sum = sum as f64;
        Some(sum)
    };
    let total_listings = guarded(MetricKind::TotalListings, total_input);

    let mean_price = guarded(MetricKind::MeanPrice, headline_mean_price(listings));

    let critical_input = if neighbourhoods.is_empty() {
        None
    } else {
        let count = neighbourhoods
            .iter()
            .filter(|row| row.ratio_entire_home_pct > CRITICAL_RATIO_THRESHOLD_PCT)
            .count();
        #[allow(clippy::cast_precision_loss)]
        let count = count as f64;
        Some(count)
    };
    let critical_neighbourhoods = guarded(MetricKind::CriticalNeighbourhoods, critical_input);

    // Unweighted mean across cities. A listing-weighted mean would
    // differ; the unweighted form is the documented default.
    let overall_ratio = guarded(
        MetricKind::OverallRatio,
        mean(cities.iter().map(|c| c.ratio_entire_home_pct)),
    );

    let mean_occupancy = guarded(MetricKind::MeanOccupancy, occupancy_from(listings));

    let economic_impact = guarded(
        MetricKind::EconomicImpact,
        Some(economic_impact_m_eur(
            total_listings.value,
            mean_price.value,
            mean_occupancy.value,
        )),
    );

    SummaryMetrics {
        total_listings,
        mean_price,
        critical_neighbourhoods,
        overall_ratio,
        mean_occupancy,
        economic_impact_m_eur: economic_impact,
    }
}

/// Validates a computed value against its spec, substituting the
/// documented fallback when it is absent, undefined, or implausible.
fn guarded(kind: MetricKind, computed: Option<f64>) -> Metric {
    let spec = MetricSpec::for_kind(kind);

    match computed {
        Some(value) if spec.accepts(value) => Metric::computed(value),
        Some(value) => {
            log::warn!(
                "Metric {kind} computed {value} outside [{}, {}]; using fallback {}",
                spec.min,
                spec.max,
                spec.default
            );
            Metric::substituted(spec.default)
        }
        None => {
            log::warn!("Metric {kind} has no input data; using fallback {}", spec.default);
            Metric::substituted(spec.default)
        }
    }
}

/// Mean nightly price over the interior band, or `None` when no listing
/// falls inside it.
fn headline_mean_price(listings: &[Listing]) -> Option<f64> {
    mean(
        listings
            .iter()
            .map(|l| l.price)
            .filter(|p| (HEADLINE_PRICE_BAND.0..=HEADLINE_PRICE_BAND.1).contains(p)),
    )
}

/// Occupancy estimate from the listing-level availability values:
/// `max((365 − mean availability)/365 × 100, 40)`.
fn occupancy_from(listings: &[Listing]) -> Option<f64> {
    let mean_availability = mean(
        listings
            .iter()
            .filter_map(|l| l.availability_365.map(f64::from)),
    )?;
    Some(((365.0 - mean_availability) / 365.0 * 100.0).max(40.0))
}

/// Conservative direct-impact estimate in millions of euros per year,
/// floored at 100 M€ once listings and prices are known.
fn economic_impact_m_eur(total_listings: f64, mean_price: f64, occupancy_pct: f64) -> f64 {
    let occupancy = occupancy_pct.max(50.0) / 100.0;
    let impact = total_listings * mean_price * occupancy * OPERATING_DAYS_PER_YEAR
        * TOTAL_SPEND_MULTIPLIER
        / 1_000_000.0;
    impact.max(100.0)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u64;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / count as f64;
        Some(mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_map_listing_models::RoomType;

    fn city(city: &str, total: u64, ratio: f64) -> CityAggregate {
        CityAggregate {
            city: city.to_string(),
            total_listings: total,
            entire_home_count: 0,
            ratio_entire_home_pct: ratio,
            mean_price: 90.0,
            mean_availability: 200.0,
            estimated_occupancy_pct: 45.0,
            barrios_count: 10,
        }
    }

    fn neighbourhood(name: &str, ratio: f64) -> NeighborhoodAggregate {
        NeighborhoodAggregate {
            city: "madrid".to_string(),
            neighbourhood: name.to_string(),
            total_listings: 100,
            entire_home_count: 50,
            ratio_entire_home_pct: ratio,
            mean_price: 90.0,
            mean_availability: 200.0,
            mean_latitude: 0.0,
            mean_longitude: 0.0,
        }
    }

    fn listing(price: f64, availability: Option<u16>) -> Listing {
        Listing {
            city: "madrid".to_string(),
            neighbourhood: "Sol".to_string(),
            room_type: RoomType::EntireHomeApt,
            price,
            availability_365: availability,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn empty_inputs_yield_flagged_fallbacks_for_every_metric() {
        let summary = summary_metrics(&[], &[], &[]);

        for (kind, metric) in summary.entries() {
            assert!(metric.fallback, "{kind} must be flagged on empty input");
            let spec = MetricSpec::for_kind(kind);
            assert!(
                spec.accepts(metric.value),
                "{kind} fallback must be in range"
            );
        }
    }

    #[test]
    fn computes_totals_and_ratio_from_city_rows() {
        let cities = vec![city("madrid", 9_000, 55.0), city("barcelona", 7_000, 65.0)];
        let listings: Vec<Listing> = (0..100).map(|_| listing(90.0, Some(146))).collect();
        let summary = summary_metrics(&cities, &[neighbourhood("Sol", 50.0)], &listings);

        assert!(!summary.total_listings.fallback);
        assert!((summary.total_listings.value - 16_000.0).abs() < f64::EPSILON);

        // Unweighted mean: (55 + 65) / 2, not weighted by listing count.
        assert!(!summary.overall_ratio.fallback);
        assert!((summary.overall_ratio.value - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn critical_count_uses_the_threshold_exclusively() {
        let rows = vec![
            neighbourhood("Sol", 70.0),
            neighbourhood("Lavapiés", 70.1),
            neighbourhood("Chamberí", 95.0),
        ];
        let listings: Vec<Listing> = (0..2_000).map(|_| listing(90.0, Some(146))).collect();
        let summary = summary_metrics(&[city("madrid", 2_000, 55.0)], &rows, &listings);

        assert!(!summary.critical_neighbourhoods.fallback);
        assert!((summary.critical_neighbourhoods.value - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_critical_neighbourhoods_is_a_computed_value() {
        let rows = vec![neighbourhood("Sol", 10.0)];
        let listings: Vec<Listing> = (0..2_000).map(|_| listing(90.0, Some(146))).collect();
        let summary = summary_metrics(&[city("madrid", 2_000, 55.0)], &rows, &listings);

        assert!(!summary.critical_neighbourhoods.fallback);
        assert!(summary.critical_neighbourhoods.value.abs() < f64::EPSILON);
    }

    #[test]
    fn headline_price_ignores_band_outliers() {
        let listings = vec![listing(5.0, None), listing(100.0, None), listing(2_000.0, None)];
        let summary = summary_metrics(&[city("madrid", 2_000, 55.0)], &[], &listings);

        assert!(!summary.mean_price.fallback);
        assert!((summary.mean_price.value - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_ratio_falls_back() {
        // A single tiny city of entire homes: ratio 100 > valid max 95.
        let cities = vec![city("mallorca", 5_000, 100.0)];
        let listings: Vec<Listing> = (0..5_000).map(|_| listing(90.0, Some(146))).collect();
        let summary = summary_metrics(&cities, &[], &listings);

        assert!(summary.overall_ratio.fallback);
        assert!((summary.overall_ratio.value - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn occupancy_is_floored_and_derived_from_availability() {
        // availability 146 -> (365-146)/365*100 = 60%.
        let listings: Vec<Listing> = (0..2_000).map(|_| listing(90.0, Some(146))).collect();
        let summary = summary_metrics(&[city("madrid", 2_000, 55.0)], &[], &listings);
        assert!(!summary.mean_occupancy.fallback);
        assert!((summary.mean_occupancy.value - 60.0).abs() < 1e-9);

        // Fully available all year computes 0%, floored to 40, which is
        // still inside the valid range.
        let idle: Vec<Listing> = (0..2_000).map(|_| listing(90.0, Some(365))).collect();
        let summary = summary_metrics(&[city("madrid", 2_000, 55.0)], &[], &idle);
        assert!(!summary.mean_occupancy.fallback);
        assert!((summary.mean_occupancy.value - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn economic_impact_follows_the_formula() {
        let listings: Vec<Listing> = (0..10_000).map(|_| listing(90.0, Some(146))).collect();
        let summary = summary_metrics(&[city("madrid", 10_000, 55.0)], &[], &listings);

        // 10_000 listings × 90 €/night × 60% × 280 days × 1.8 / 1e6.
        let expected = 10_000.0 * 90.0 * 0.6 * 280.0 * 1.8 / 1_000_000.0;
        assert!(!summary.economic_impact_m_eur.fallback);
        assert!((summary.economic_impact_m_eur.value - expected).abs() < 1e-9);
    }

    #[test]
    fn all_metrics_present_even_with_partial_data() {
        // Cities known, but no listings at all: price and occupancy fall
        // back, totals compute.
        let summary = summary_metrics(&[city("madrid", 9_000, 55.0)], &[], &[]);

        assert!(!summary.total_listings.fallback);
        assert!(summary.mean_price.fallback);
        assert!(summary.mean_occupancy.fallback);
        assert!((summary.mean_price.value - 85.0).abs() < f64::EPSILON);
    }
}
