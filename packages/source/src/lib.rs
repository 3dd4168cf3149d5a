#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listing data loading and validation.
//!
//! Reads per-city listings tables (CSV), applies the strict cleaning
//! rules, and exposes a process-lifetime [`catalog::Catalog`] that
//! memoizes loads per resolved file path. City sources are defined as
//! TOML files embedded at compile time, following the same registry
//! pattern as the boundary source definitions.

pub mod catalog;
pub mod loader;
pub mod paths;
pub mod registry;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading listing data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A required source file could not be located.
    ///
    /// Callers surface this as a user-facing message and continue with
    /// empty collections; it never aborts the session.
    #[error("Data unavailable: {path} could not be found")]
    DataUnavailable {
        /// The path that was searched.
        path: PathBuf,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Reading the source file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
