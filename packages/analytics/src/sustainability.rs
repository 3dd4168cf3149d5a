//! Per-city sustainability proxies.
//!
//! Three coarse indicators derived from the aggregate tables: pressure
//! on the housing stock, territorial concentration of listings, and the
//! affordability of a short stay relative to the mean salary. Each is
//! capped for presentation; cities with no usable data receive the
//! national sector reference constants, flagged as fallbacks.

use rental_map_analytics_models::{CityAggregate, NeighborhoodAggregate, SustainabilityIndicators};

/// Assumed residents per neighbourhood with listings, a mean urban
/// density figure used to approximate the exposed population.
pub const RESIDENTS_PER_BARRIO: f64 = 800.0;

/// Mean monthly salary in euros (INE, 2024) used by the accessibility
/// indicator.
pub const MEAN_MONTHLY_SALARY_EUR: f64 = 2_300.0;

/// Nights assumed for the reference stay.
pub const REFERENCE_STAY_NIGHTS: f64 = 3.0;

/// Presentation caps, matching the dashboard's axis ranges.
const HOUSING_PRESSURE_CAP: f64 = 20.0;
const CONCENTRATION_CAP: f64 = 3.0;
const ACCESSIBILITY_CAP: f64 = 25.0;

/// National sector reference values substituted when a city has no
/// usable data.
const FALLBACK_HOUSING_PRESSURE: f64 = 9.2;
const FALLBACK_CONCENTRATION: f64 = 1.7;
const FALLBACK_ACCESSIBILITY: f64 = 66.0;

/// Computes the sustainability indicators for one city.
///
/// `neighbourhoods` may contain rows for other cities; only rows
/// matching `city.city` contribute.
#[must_use]
pub fn indicators_for_city(
    city: &CityAggregate,
    neighbourhoods: &[NeighborhoodAggregate],
) -> SustainabilityIndicators {
    let counts: Vec<f64> = neighbourhoods
        .iter()
        .filter(|row| row.city == city.city && row.total_listings > 0)
        .map(|row| {
            #[allow(clippy::cast_precision_loss)]
            let count = row.total_listings as f64;
            count
        })
        .collect();

    if city.total_listings == 0 || counts.is_empty() || city.mean_price <= 0.0 {
        log::warn!(
            "No usable data for {}; substituting sector reference indicators",
            city.city
        );
        return SustainabilityIndicators {
            city: city.city.clone(),
            housing_pressure: FALLBACK_HOUSING_PRESSURE,
            tourist_concentration: FALLBACK_CONCENTRATION,
            economic_accessibility: FALLBACK_ACCESSIBILITY,
            fallback: true,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let estimated_population = counts.len() as f64 * RESIDENTS_PER_BARRIO;
    #[allow(clippy::cast_precision_loss)]
    let total_listings = city.total_listings as f64;

    let housing_pressure = (total_listings / estimated_population * 100.0).min(HOUSING_PRESSURE_CAP);

    let tourist_concentration = coefficient_of_variation(&counts).min(CONCENTRATION_CAP);

    let economic_accessibility = (city.mean_price * REFERENCE_STAY_NIGHTS
        / MEAN_MONTHLY_SALARY_EUR
        * 100.0)
        .min(ACCESSIBILITY_CAP);

    SustainabilityIndicators {
        city: city.city.clone(),
        housing_pressure,
        tourist_concentration,
        economic_accessibility,
        fallback: false,
    }
}

/// Sample coefficient of variation (σ/μ) of the per-barrio listing
/// counts; 0 when fewer than two barrios make a spread meaningless.
fn coefficient_of_variation(counts: &[f64]) -> f64 {
    if counts.len() < 2 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = counts.len() as f64;
    let mean = counts.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }

    let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt() / mean
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(key: &str, total: u64, mean_price: f64) -> CityAggregate {
        CityAggregate {
            city: key.to_string(),
            total_listings: total,
            entire_home_count: 0,
            ratio_entire_home_pct: 50.0,
            mean_price,
            mean_availability: 200.0,
            estimated_occupancy_pct: 45.0,
            barrios_count: 0,
        }
    }

    fn neighbourhood(city: &str, name: &str, total: u64) -> NeighborhoodAggregate {
        NeighborhoodAggregate {
            city: city.to_string(),
            neighbourhood: name.to_string(),
            total_listings: total,
            entire_home_count: 0,
            ratio_entire_home_pct: 50.0,
            mean_price: 90.0,
            mean_availability: 200.0,
            mean_latitude: 0.0,
            mean_longitude: 0.0,
        }
    }

    #[test]
    fn computes_all_three_indicators() {
        let rows = vec![
            neighbourhood("madrid", "Sol", 600),
            neighbourhood("madrid", "Lavapiés", 200),
            neighbourhood("madrid", "Chamberí", 400),
            neighbourhood("barcelona", "El Raval", 999),
        ];
        let indicators = indicators_for_city(&city("madrid", 1_200, 92.0), &rows);

        assert!(!indicators.fallback);

        // 1200 listings over 3 barrios × 800 residents = 50%, capped at 20.
        assert!((indicators.housing_pressure - 20.0).abs() < f64::EPSILON);

        // counts 600/200/400: mean 400, sample σ = 200, cv = 0.5.
        assert!((indicators.tourist_concentration - 0.5).abs() < 1e-12);

        // 92 € × 3 nights / 2300 € × 100 = 12%.
        assert!((indicators.economic_accessibility - 12.0).abs() < 1e-12);
    }

    #[test]
    fn other_cities_rows_do_not_contribute() {
        let rows = vec![
            neighbourhood("madrid", "Sol", 100),
            neighbourhood("madrid", "Chamberí", 100),
            neighbourhood("barcelona", "El Raval", 100_000),
        ];
        let indicators = indicators_for_city(&city("madrid", 200, 90.0), &rows);

        // Identical counts: no spread at all.
        assert!(indicators.tourist_concentration.abs() < f64::EPSILON);
    }

    #[test]
    fn single_barrio_has_zero_concentration() {
        let rows = vec![neighbourhood("madrid", "Sol", 500)];
        let indicators = indicators_for_city(&city("madrid", 500, 90.0), &rows);
        assert!(indicators.tourist_concentration.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_city_receives_flagged_reference_values() {
        let indicators = indicators_for_city(&city("mallorca", 0, 0.0), &[]);

        assert!(indicators.fallback);
        assert!((indicators.housing_pressure - FALLBACK_HOUSING_PRESSURE).abs() < f64::EPSILON);
        assert!((indicators.tourist_concentration - FALLBACK_CONCENTRATION).abs() < f64::EPSILON);
        assert!(
            (indicators.economic_accessibility - FALLBACK_ACCESSIBILITY).abs() < f64::EPSILON
        );
    }
}
