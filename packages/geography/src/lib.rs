#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary polygon loading and centroid computation.
//!
//! Parses the per-city neighbourhood `GeoJSON` files into typed boundary
//! features (with canonical names computed once at load) and derives
//! cached representative points for marker placement.

pub mod boundaries;
pub mod centroid;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading boundary data.
#[derive(Debug, Error)]
pub enum GeographyError {
    /// The boundary file could not be located.
    ///
    /// Map rendering degrades to placeholder positions; this never
    /// aborts the session.
    #[error("Boundary data unavailable: {path} could not be found")]
    DataUnavailable {
        /// The path that was searched.
        path: PathBuf,
    },

    /// Reading the boundary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}
