//! Raw listing loader and cleaning rules.
//!
//! Reads a listings CSV into cleaned [`Listing`] records. Columns are
//! renamed to the fixed schema exactly once here; downstream consumers
//! never probe alternative column names. Extra columns in the source are
//! ignored.
//!
//! Cleaning order (each rule applies to the survivors of the previous
//! one): drop rows with a missing city or neighbourhood, drop rows whose
//! price fails numeric coercion, drop non-positive prices, drop prices at
//! or above [`PRICE_OUTLIER_CEILING`]. Every dropped row is tallied in
//! the [`CleanReport`] so diagnostics never disappear silently.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rental_map_listing_models::{Listing, RoomType};
use serde::Deserialize;

use crate::SourceError;

/// Prices at or above this value are treated as data-entry outliers and
/// excluded from aggregation.
pub const PRICE_OUTLIER_CEILING: f64 = 6501.0;

/// A raw CSV row before validation. All fields are optional; validation
/// decides what survives.
#[derive(Debug, Deserialize)]
struct RawListingRecord {
    /// City column as published in the unified dataset.
    #[serde(default, rename = "ciudad")]
    city: Option<String>,
    /// Cleansed neighbourhood name column.
    #[serde(default, rename = "neighbourhood_cleansed")]
    neighbourhood: Option<String>,
    #[serde(default)]
    room_type: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    availability_365: Option<String>,
    #[serde(default)]
    latitude: Option<String>,
    #[serde(default)]
    longitude: Option<String>,
}

/// Per-rule tallies from one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Rows read from the source, before any rule ran.
    pub rows_read: u64,
    /// Rows that survived every rule.
    pub rows_kept: u64,
    /// Rows dropped for a missing city or neighbourhood.
    pub dropped_missing_fields: u64,
    /// Rows dropped because the price failed numeric coercion (or was
    /// absent).
    pub dropped_unparseable_price: u64,
    /// Rows dropped for a zero or negative price.
    pub dropped_nonpositive_price: u64,
    /// Rows dropped for a price at or above the outlier ceiling.
    pub dropped_outlier_price: u64,
}

impl CleanReport {
    /// Total rows excluded by the cleaning rules.
    #[must_use]
    pub const fn dropped_total(&self) -> u64 {
        self.dropped_missing_fields
            + self.dropped_unparseable_price
            + self.dropped_nonpositive_price
            + self.dropped_outlier_price
    }
}

/// A cleaned listing set together with its cleaning diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LoadedListings {
    /// Cleaned records, in source order.
    pub listings: Vec<Listing>,
    /// What the cleaning rules did.
    pub report: CleanReport,
}

/// Loads and cleans a listings CSV from disk.
///
/// # Errors
///
/// Returns [`SourceError::DataUnavailable`] when the file does not
/// exist, or a CSV/IO error when it exists but cannot be parsed.
pub fn load_listings(path: &Path) -> Result<LoadedListings, SourceError> {
    if !path.is_file() {
        return Err(SourceError::DataUnavailable {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let loaded = read_listings(file)?;

    log::info!(
        "Loaded {}: kept {} of {} rows ({} dropped)",
        path.display(),
        loaded.report.rows_kept,
        loaded.report.rows_read,
        loaded.report.dropped_total(),
    );

    Ok(loaded)
}

/// Reads and cleans listings from any CSV byte stream.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if a row cannot be decoded.
pub fn read_listings<R: Read>(reader: R) -> Result<LoadedListings, SourceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut report = CleanReport::default();
    let mut listings = Vec::new();

    for record in csv_reader.deserialize::<RawListingRecord>() {
        let record = record?;
        report.rows_read += 1;

        if let Some(listing) = clean_record(record, &mut report) {
            listings.push(listing);
        }
    }

    report.rows_kept = listings.len() as u64;

    log::debug!(
        "Cleaning pass: {} missing fields, {} unparseable price, {} non-positive, {} outliers",
        report.dropped_missing_fields,
        report.dropped_unparseable_price,
        report.dropped_nonpositive_price,
        report.dropped_outlier_price,
    );

    Ok(LoadedListings { listings, report })
}

/// Applies the cleaning rules to one raw record, tallying drops.
fn clean_record(record: RawListingRecord, report: &mut CleanReport) -> Option<Listing> {
    let city = non_blank(record.city.as_deref());
    let neighbourhood = non_blank(record.neighbourhood.as_deref());

    let (Some(city), Some(neighbourhood)) = (city, neighbourhood) else {
        report.dropped_missing_fields += 1;
        return None;
    };

    let Some(price) = record.price.as_deref().and_then(coerce_numeric) else {
        report.dropped_unparseable_price += 1;
        return None;
    };

    if price <= 0.0 {
        report.dropped_nonpositive_price += 1;
        return None;
    }

    if price >= PRICE_OUTLIER_CEILING {
        report.dropped_outlier_price += 1;
        return None;
    }

    Some(Listing {
        // The city key is lowercased exactly once, here at ingestion.
        city: city.to_lowercase(),
        neighbourhood: neighbourhood.to_string(),
        room_type: RoomType::from_source(record.room_type.as_deref().unwrap_or_default()),
        price,
        availability_365: record
            .availability_365
            .as_deref()
            .and_then(coerce_numeric)
            .and_then(availability_in_range),
        latitude: record.latitude.as_deref().and_then(coerce_numeric),
        longitude: record.longitude.as_deref().and_then(coerce_numeric),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Coerces a raw cell to a finite number, or `None` when it cannot be
/// parsed.
fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts availability only within the documented 0-365 range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn availability_in_range(value: f64) -> Option<u16> {
    if (0.0..=365.0).contains(&value) {
        Some(value.round() as u16)
    } else {
        None
    }
}
