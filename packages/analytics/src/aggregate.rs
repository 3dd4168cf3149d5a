//! Groups cleaned listings into KPI tables.
//!
//! Grouping happens on the raw city and neighbourhood keys; spelling
//! variants of the same neighbourhood stay distinct here and are only
//! unified later by the canonical name join. All grouped collections are
//! `BTreeMap`-backed, so output ordering (and therefore serialized
//! bytes) is identical across runs with the same input.

use std::collections::{BTreeMap, BTreeSet};

use rental_map_analytics_models::{CityAggregate, NeighborhoodAggregate};
use rental_map_listing_models::Listing;

/// Mean availability substituted when no listing in a group reports
/// `availability_365`.
pub const DEFAULT_MEAN_AVAILABILITY: f64 = 200.0;

/// Running sums for one listing group.
#[derive(Debug, Default)]
struct GroupAccumulator {
    count: u64,
    entire_home_count: u64,
    price_sum: f64,
    availability_sum: f64,
    availability_count: u64,
    latitude_sum: f64,
    longitude_sum: f64,
    coordinate_count: u64,
}

impl GroupAccumulator {
    fn push(&mut self, listing: &Listing) {
        self.count += 1;
        if listing.room_type.is_entire_home() {
            self.entire_home_count += 1;
        }
        self.price_sum += listing.price;
        if let Some(availability) = listing.availability_365 {
            self.availability_sum += f64::from(availability);
            self.availability_count += 1;
        }
        if let (Some(lat), Some(lon)) = (listing.latitude, listing.longitude) {
            self.latitude_sum += lat;
            self.longitude_sum += lon;
            self.coordinate_count += 1;
        }
    }

    fn ratio_entire_home_pct(&self) -> f64 {
        ratio_pct(self.entire_home_count, self.count)
    }

    fn mean_price(&self) -> f64 {
        mean_or(self.price_sum, self.count, 0.0)
    }

    fn mean_availability(&self) -> f64 {
        mean_or(
            self.availability_sum,
            self.availability_count,
            DEFAULT_MEAN_AVAILABILITY,
        )
    }
}

/// Groups listings by (city, neighbourhood), sorted by key.
#[must_use]
pub fn aggregate_by_neighbourhood(listings: &[Listing]) -> Vec<NeighborhoodAggregate> {
    let mut groups: BTreeMap<(&str, &str), GroupAccumulator> = BTreeMap::new();

    for listing in listings {
        groups
            .entry((listing.city.as_str(), listing.neighbourhood.as_str()))
            .or_default()
            .push(listing);
    }

    groups
        .into_iter()
        .map(|((city, neighbourhood), group)| NeighborhoodAggregate {
            city: city.to_string(),
            neighbourhood: neighbourhood.to_string(),
            total_listings: group.count,
            entire_home_count: group.entire_home_count,
            ratio_entire_home_pct: group.ratio_entire_home_pct(),
            mean_price: group.mean_price(),
            mean_availability: group.mean_availability(),
            mean_latitude: mean_or(group.latitude_sum, group.coordinate_count, 0.0),
            mean_longitude: mean_or(group.longitude_sum, group.coordinate_count, 0.0),
        })
        .collect()
}

/// Groups listings by city, sorted by key.
#[must_use]
pub fn aggregate_by_city(listings: &[Listing]) -> Vec<CityAggregate> {
    let mut groups: BTreeMap<&str, (GroupAccumulator, BTreeSet<&str>)> = BTreeMap::new();

    for listing in listings {
        let (group, neighbourhoods) = groups.entry(listing.city.as_str()).or_default();
        group.push(listing);
        neighbourhoods.insert(listing.neighbourhood.as_str());
    }

    groups
        .into_iter()
        .map(|(city, (group, neighbourhoods))| {
            let mean_availability = group.mean_availability();
            CityAggregate {
                city: city.to_string(),
                total_listings: group.count,
                entire_home_count: group.entire_home_count,
                ratio_entire_home_pct: group.ratio_entire_home_pct(),
                mean_price: group.mean_price(),
                mean_availability,
                estimated_occupancy_pct: estimated_occupancy_pct(mean_availability),
                barrios_count: neighbourhoods.len() as u64,
            }
        })
        .collect()
}

/// Percentage guarded against division by zero: 0 when the whole is 0.
#[must_use]
pub fn ratio_pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let pct = part as f64 / whole as f64 * 100.0;
        pct
    }
}

/// Arithmetic mean with an explicit guarded default for empty groups,
/// never NaN.
fn mean_or(sum: f64, count: u64, default: f64) -> f64 {
    if count == 0 {
        default
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / count as f64;
        mean
    }
}

/// Occupancy estimate from mean availability:
/// `max(0, 100 − availability/365 × 100)`, 0 when availability is not
/// positive.
fn estimated_occupancy_pct(mean_availability: f64) -> f64 {
    if mean_availability > 0.0 {
        (100.0 - mean_availability / 365.0 * 100.0).max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_map_listing_models::RoomType;

    fn listing(city: &str, neighbourhood: &str, room_type: RoomType, price: f64) -> Listing {
        Listing {
            city: city.to_string(),
            neighbourhood: neighbourhood.to_string(),
            room_type,
            price,
            availability_365: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn madrid_sol_example() {
        let listings = vec![
            listing("madrid", "Sol", RoomType::EntireHomeApt, 100.0),
            listing("madrid", "Sol", RoomType::PrivateRoom, 50.0),
        ];

        let rows = aggregate_by_neighbourhood(&listings);
        assert_eq!(rows.len(), 1);

        let sol = &rows[0];
        assert_eq!(sol.city, "madrid");
        assert_eq!(sol.neighbourhood, "Sol");
        assert_eq!(sol.total_listings, 2);
        assert_eq!(sol.entire_home_count, 1);
        assert!((sol.ratio_entire_home_pct - 50.0).abs() < f64::EPSILON);
        assert!((sol.mean_price - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_stays_in_bounds() {
        let mut listings = Vec::new();
        for i in 0..7 {
            let room_type = if i % 2 == 0 {
                RoomType::EntireHomeApt
            } else {
                RoomType::SharedRoom
            };
            listings.push(listing("madrid", "Lavapiés", room_type, 60.0));
        }

        for row in aggregate_by_neighbourhood(&listings) {
            assert!(row.ratio_entire_home_pct >= 0.0);
            assert!(row.ratio_entire_home_pct <= 100.0);
        }
    }

    #[test]
    fn neighbourhood_totals_conserve_city_totals() {
        let listings = vec![
            listing("madrid", "Sol", RoomType::EntireHomeApt, 100.0),
            listing("madrid", "Lavapiés", RoomType::PrivateRoom, 40.0),
            listing("madrid", "Chamberí", RoomType::EntireHomeApt, 90.0),
            listing("barcelona", "El Raval", RoomType::SharedRoom, 30.0),
            listing("barcelona", "El Raval", RoomType::EntireHomeApt, 120.0),
        ];

        let cities = aggregate_by_city(&listings);
        let neighbourhoods = aggregate_by_neighbourhood(&listings);

        for city in &cities {
            let sum: u64 = neighbourhoods
                .iter()
                .filter(|row| row.city == city.city)
                .map(|row| row.total_listings)
                .sum();
            assert_eq!(sum, city.total_listings, "conservation for {}", city.city);
        }
    }

    #[test]
    fn spelling_variants_stay_distinct_here() {
        let listings = vec![
            listing("barcelona", "Ciutat Vella", RoomType::EntireHomeApt, 100.0),
            listing("barcelona", "ciutat   vella", RoomType::PrivateRoom, 50.0),
        ];

        let rows = aggregate_by_neighbourhood(&listings);
        assert_eq!(rows.len(), 2, "normalization happens later, not here");

        let cities = aggregate_by_city(&listings);
        assert_eq!(cities[0].barrios_count, 2);
    }

    #[test]
    fn availability_defaults_when_absent() {
        let rows = aggregate_by_neighbourhood(&[listing(
            "madrid",
            "Sol",
            RoomType::PrivateRoom,
            50.0,
        )]);
        assert!((rows[0].mean_availability - DEFAULT_MEAN_AVAILABILITY).abs() < f64::EPSILON);
        assert!((rows[0].mean_latitude).abs() < f64::EPSILON);
    }

    #[test]
    fn availability_mean_and_occupancy() {
        let mut first = listing("madrid", "Sol", RoomType::PrivateRoom, 50.0);
        first.availability_365 = Some(100);
        let mut second = listing("madrid", "Sol", RoomType::PrivateRoom, 50.0);
        second.availability_365 = Some(300);
        // No availability: excluded from the mean, not counted as zero.
        let third = listing("madrid", "Sol", RoomType::PrivateRoom, 50.0);

        let cities = aggregate_by_city(&[first, second, third]);
        assert!((cities[0].mean_availability - 200.0).abs() < f64::EPSILON);

        let expected_occupancy = 100.0 - 200.0 / 365.0 * 100.0;
        assert!((cities[0].estimated_occupancy_pct - expected_occupancy).abs() < 1e-12);
    }

    #[test]
    fn ratio_of_empty_group_is_zero_not_nan() {
        assert!(ratio_pct(0, 0).abs() < f64::EPSILON);
        assert!((ratio_pct(1, 2) - 50.0).abs() < f64::EPSILON);
        assert!((ratio_pct(2, 2) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_yields_empty_tables() {
        assert!(aggregate_by_neighbourhood(&[]).is_empty());
        assert!(aggregate_by_city(&[]).is_empty());
    }

    #[test]
    fn output_is_deterministic_and_sorted() {
        let listings = vec![
            listing("madrid", "Sol", RoomType::EntireHomeApt, 100.0),
            listing("barcelona", "Gràcia", RoomType::PrivateRoom, 50.0),
            listing("madrid", "Chamberí", RoomType::PrivateRoom, 70.0),
        ];

        let first = aggregate_by_neighbourhood(&listings);
        let second = aggregate_by_neighbourhood(&listings);
        assert_eq!(
            serde_json::to_string(&first).expect("serialize"),
            serde_json::to_string(&second).expect("serialize"),
            "re-running must yield byte-identical aggregates"
        );

        let keys: Vec<_> = first
            .iter()
            .map(|row| (row.city.clone(), row.neighbourhood.clone()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
