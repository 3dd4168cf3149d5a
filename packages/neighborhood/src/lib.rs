#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighbourhood name normalization and cross-dataset joins.
//!
//! Listings and boundary polygons spell the same neighbourhood in
//! different ways (accents, casing, stray punctuation, doubled spaces).
//! Both sides are reduced to one canonical form before joining, and the
//! join reports what failed to match instead of dropping it.

pub mod matching;
pub mod normalize;
