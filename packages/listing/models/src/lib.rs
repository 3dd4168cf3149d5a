#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Listing record types and the accommodation taxonomy.
//!
//! This crate defines the canonical cleaned listing record plus the two
//! classifications used across the rental-map system: the room type
//! taxonomy (as published by the listings platform) and the saturation
//! tier bands derived from a neighbourhood's entire-home ratio.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Accommodation type for a listing, as published by the platform.
///
/// Classification from the raw source string is exact-match and
/// case-sensitive; anything outside the four published labels maps to
/// [`RoomType::Other`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    /// A whole dwelling rented as one unit ("Entire home/apt").
    EntireHomeApt,
    /// A private room within an occupied dwelling ("Private room").
    PrivateRoom,
    /// A shared room ("Shared room").
    SharedRoom,
    /// A hotel-style room ("Hotel room").
    HotelRoom,
    /// Any other source label.
    Other,
}

impl RoomType {
    /// Classifies a raw source string into the taxonomy.
    ///
    /// Exact-match and case-sensitive, matching the labels as they appear
    /// in the source data. Unknown labels become [`Self::Other`].
    #[must_use]
    pub fn from_source(raw: &str) -> Self {
        match raw {
            "Entire home/apt" => Self::EntireHomeApt,
            "Private room" => Self::PrivateRoom,
            "Shared room" => Self::SharedRoom,
            "Hotel room" => Self::HotelRoom,
            _ => Self::Other,
        }
    }

    /// Returns the source label for this room type, if it has one.
    #[must_use]
    pub const fn source_label(self) -> Option<&'static str> {
        match self {
            Self::EntireHomeApt => Some("Entire home/apt"),
            Self::PrivateRoom => Some("Private room"),
            Self::SharedRoom => Some("Shared room"),
            Self::HotelRoom => Some("Hotel room"),
            Self::Other => None,
        }
    }

    /// Whether this listing removes a whole dwelling from the residential
    /// market. Only entire homes count toward the entire-home ratio.
    #[must_use]
    pub const fn is_entire_home(self) -> bool {
        matches!(self, Self::EntireHomeApt)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::EntireHomeApt,
            Self::PrivateRoom,
            Self::SharedRoom,
            Self::HotelRoom,
            Self::Other,
        ]
    }
}

/// Saturation tier for a neighbourhood, derived from its entire-home
/// ratio percentage.
///
/// Bands: below 40 sustainable, 40 to 60 moderate, 60 to 80 high,
/// above 80 critical.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SaturationTier {
    /// Entire-home ratio below 40%.
    Sustainable,
    /// Ratio in the 40-60% band.
    Moderate,
    /// Ratio in the 60-80% band.
    High,
    /// Ratio above 80%.
    Critical,
}

impl SaturationTier {
    /// Classifies an entire-home ratio percentage into its tier.
    ///
    /// A NaN ratio classifies as [`Self::Sustainable`] (no evidence of
    /// saturation).
    #[must_use]
    pub fn from_ratio(ratio_entire_home_pct: f64) -> Self {
        if ratio_entire_home_pct > 80.0 {
            Self::Critical
        } else if ratio_entire_home_pct > 60.0 {
            Self::High
        } else if ratio_entire_home_pct >= 40.0 {
            Self::Moderate
        } else {
            Self::Sustainable
        }
    }

    /// Returns all variants of this enum, least to most saturated.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Sustainable,
            Self::Moderate,
            Self::High,
            Self::Critical,
        ]
    }
}

/// A cleaned listing record, one per accommodation.
///
/// Produced by the loader after validation; guaranteed to have a
/// non-empty city and neighbourhood and a price in the accepted range.
/// The city is lowercased once at ingestion and used verbatim as the
/// grouping key everywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Lowercase city key (e.g. "madrid").
    pub city: String,
    /// Neighbourhood name as it appears in the source (free text).
    pub neighbourhood: String,
    /// Accommodation type.
    pub room_type: RoomType,
    /// Nightly price in currency units. Always positive and below the
    /// loader's outlier ceiling.
    pub price: f64,
    /// Days available per year (0-365), when the source provides it.
    pub availability_365: Option<u16>,
    /// Latitude in decimal degrees, when the source provides it.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, when the source provides it.
    pub longitude: Option<f64>,
}
