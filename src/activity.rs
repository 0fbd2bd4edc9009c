//! Activity records shown on the Hub feed

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Whether an activity is booked alone or with a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Solo,
    Group,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Solo => "solo",
            ActivityKind::Group => "group",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solo" => Ok(ActivityKind::Solo),
            "group" => Ok(ActivityKind::Group),
            other => Err(ValidationError::InvalidFieldValue {
                field: "kind".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A bookable activity with a fixed number of seats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub city: String,
    pub country: String,
    pub kind: ActivityKind,
    pub rating: f64,
    pub capacity: u32,
    #[serde(default)]
    pub booked: u32,
}

impl Activity {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        kind: ActivityKind,
        rating: f64,
        capacity: u32,
        booked: u32,
    ) -> Self {
        Activity {
            id: id.into(),
            title: title.into(),
            city: city.into(),
            country: country.into(),
            kind,
            rating,
            capacity,
            booked,
        }
    }

    /// Seats still open, never negative
    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.booked)
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }

    pub fn flag(&self) -> &'static str {
        flag_emoji(&self.country)
    }

    /// Checks the record invariants: positive capacity, `booked <= capacity`,
    /// rating within [0, 5].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(ValidationError::InvalidRating {
                id: self.id.clone(),
                rating: self.rating,
            });
        }
        if self.capacity == 0 || self.booked > self.capacity {
            return Err(ValidationError::InvalidCapacity {
                id: self.id.clone(),
                capacity: self.capacity,
                booked: self.booked,
            });
        }
        Ok(())
    }
}

/// Maps a country name to its flag, with a white flag for anything unknown
pub fn flag_emoji(country: &str) -> &'static str {
    match country {
        "Japan" => "🇯🇵",
        "Saudi Arabia" => "🇸🇦",
        "Georgia" => "🇬🇪",
        "Oman" => "🇴🇲",
        "UAE" => "🇦🇪",
        "Qatar" => "🇶🇦",
        _ => "🏳️",
    }
}
