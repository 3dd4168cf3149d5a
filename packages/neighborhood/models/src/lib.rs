#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the neighbourhood name join.
//!
//! The join compares the aggregate side (names observed in listings)
//! against the boundary side (names in the polygon files) after both
//! have been normalized to their canonical form.

use serde::{Deserialize, Serialize};

/// Outcome of joining two neighbourhood name sets.
///
/// Unmatched names are reported, never silently dropped, so callers can
/// always state "N of M neighbourhoods matched".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinReport {
    /// Canonical names present on both sides, sorted.
    pub matched: Vec<String>,
    /// Original aggregate-side spellings with no boundary counterpart,
    /// sorted.
    pub aggregate_only: Vec<String>,
    /// Original boundary-side spellings with no aggregate counterpart,
    /// sorted.
    pub boundary_only: Vec<String>,
}

impl JoinReport {
    /// Number of canonical names matched on both sides.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Number of distinct canonical names on the aggregate side.
    #[must_use]
    pub fn aggregate_total(&self) -> usize {
        self.matched.len() + self.aggregate_only.len()
    }

    /// Whether every aggregate-side name found a boundary polygon.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.aggregate_only.is_empty()
    }

    /// Human-readable coverage line, e.g. "12 of 14 neighbourhoods
    /// matched".
    #[must_use]
    pub fn coverage(&self) -> String {
        format!(
            "{} of {} neighbourhoods matched",
            self.matched_count(),
            self.aggregate_total()
        )
    }
}
