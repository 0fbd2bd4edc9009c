//! Smart booking: picks one destination from a short list given a
//! preferred vibe and weather.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::flag_emoji;
use crate::error::ValidationError;

/// Trip length used when the user leaves days empty or zero
pub const DEFAULT_TRIP_DAYS: u32 = 4;

/// Points a destination earns for each preference it matches
const MATCH_SCORE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Nature,
    City,
}

impl Vibe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::Nature => "nature",
            Vibe::City => "city",
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Vibe {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nature" => Ok(Vibe::Nature),
            "city" => Ok(Vibe::City),
            other => Err(ValidationError::InvalidFieldValue {
                field: "vibe".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Cool,
    Mild,
    Warm,
    Hot,
}

impl Climate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Climate::Cool => "cool",
            Climate::Mild => "mild",
            Climate::Warm => "warm",
            Climate::Hot => "hot",
        }
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Climate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cool" => Ok(Climate::Cool),
            "mild" => Ok(Climate::Mild),
            "warm" => Ok(Climate::Warm),
            "hot" => Ok(Climate::Hot),
            other => Err(ValidationError::InvalidFieldValue {
                field: "weather".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A destination the suggestion card can show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub vibe: Vibe,
    pub climate: Climate,
    /// Typical trip budget, low and high end
    pub budget_range: (u32, u32),
}

impl Destination {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        vibe: Vibe,
        climate: Climate,
        budget_range: (u32, u32),
    ) -> Self {
        Destination {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            vibe,
            climate,
            budget_range,
        }
    }

    pub fn flag(&self) -> &'static str {
        flag_emoji(&self.country)
    }
}

/// What the user filled in; every field is optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub vibe: Option<Vibe>,
    pub weather: Option<Climate>,
    pub days: Option<u32>,
    pub budget: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub destination: Destination,
    pub days: u32,
    pub budget: Option<u32>,
}

/// +2 for a matching vibe, +2 for a matching climate
pub fn score(destination: &Destination, request: &SuggestRequest) -> u32 {
    let mut score = 0;
    if request.vibe == Some(destination.vibe) {
        score += MATCH_SCORE;
    }
    if request.weather == Some(destination.climate) {
        score += MATCH_SCORE;
    }
    score
}

/// Picks the best-scoring destination.
///
/// Ties go to whichever destination comes first in `destinations`. With no
/// vibe or weather chosen the first destination is returned unscored. Days
/// of zero fall back to [`DEFAULT_TRIP_DAYS`] and a zero budget counts as
/// not given. Returns `None` only for an empty list.
pub fn suggest(destinations: &[Destination], request: &SuggestRequest) -> Option<Suggestion> {
    let chosen = if request.vibe.is_none() && request.weather.is_none() {
        destinations.first()?
    } else {
        let mut scored: Vec<(u32, &Destination)> = destinations
            .iter()
            .map(|destination| (score(destination, request), destination))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.first()?.1
    };

    let days = request.days.filter(|&days| days > 0).unwrap_or(DEFAULT_TRIP_DAYS);
    let budget = request.budget.filter(|&budget| budget > 0);

    debug!(
        vibe = ?request.vibe,
        weather = ?request.weather,
        destination = %chosen.id,
        score = score(chosen, request),
        days,
        "Suggested destination"
    );

    Some(Suggestion {
        destination: chosen.clone(),
        days,
        budget,
    })
}
