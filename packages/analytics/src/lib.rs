#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listing aggregation and derived dashboard metrics.
//!
//! Groups cleaned listings into per-city and per-neighbourhood KPI
//! tables, derives the headline summary metrics (with declared fallback
//! constants when inputs are absent or implausible), computes the
//! sustainability proxies, and renders the filtered aggregate export.
//!
//! Everything here is a pure function of the current listing set plus
//! fixed constants; any change to the inputs requires a full
//! recomputation pass.

pub mod aggregate;
pub mod export;
pub mod metrics;
pub mod sustainability;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// CSV rendering failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Rendered CSV bytes were not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
