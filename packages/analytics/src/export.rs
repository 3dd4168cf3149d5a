//! CSV export of neighbourhood aggregate rows.
//!
//! Renders the currently filtered rows as comma-separated text with the
//! column order fixed to the aggregate's field order, so the download
//! matches what the tables show.

use rental_map_analytics_models::NeighborhoodAggregate;

use crate::AnalyticsError;

/// Renders aggregate rows as CSV text, header included.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if serialization fails.
pub fn export_csv(rows: &[NeighborhoodAggregate]) -> Result<String, AnalyticsError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
