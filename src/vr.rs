//! In-flight VR experience pricing

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;

pub const DEFAULT_VR_BASE_PRICE: u32 = 20;
pub const DEFAULT_VR_ACTIVITY_PRICE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Headset {
    #[default]
    BringOwn,
    Rent,
}

impl Headset {
    pub fn fee(&self) -> u32 {
        match self {
            Headset::BringOwn => 0,
            Headset::Rent => 8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Headset::BringOwn => "Bring my own",
            Headset::Rent => "Rent",
        }
    }
}

impl FromStr for Headset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "own" | "bring-own" | "bring-my-own" => Ok(Headset::BringOwn),
            "rent" => Ok(Headset::Rent),
            other => Err(ValidationError::InvalidFieldValue {
                field: "headset".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeSlot {
    #[default]
    First2Hours,
    Middle2Hours,
    FullFlight,
}

impl TimeSlot {
    pub fn fee(&self) -> u32 {
        match self {
            TimeSlot::First2Hours | TimeSlot::Middle2Hours => 0,
            TimeSlot::FullFlight => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::First2Hours => "First 2 hours",
            TimeSlot::Middle2Hours => "Middle 2 hours",
            TimeSlot::FullFlight => "Full flight",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(TimeSlot::First2Hours),
            "middle" => Ok(TimeSlot::Middle2Hours),
            "full" | "full-flight" => Ok(TimeSlot::FullFlight),
            other => Err(ValidationError::InvalidFieldValue {
                field: "slot".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VrActivity {
    PlanActivities,
    WatchMovies,
    ExploreDestination,
    PlayGames,
}

impl FromStr for VrActivity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plan" | "plan-activities" => Ok(VrActivity::PlanActivities),
            "movies" | "watch-movies" => Ok(VrActivity::WatchMovies),
            "explore" | "explore-destination" => Ok(VrActivity::ExploreDestination),
            "games" | "play-games" => Ok(VrActivity::PlayGames),
            other => Err(ValidationError::InvalidFieldValue {
                field: "activity".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VrPriceTable {
    pub base_price: u32,
    pub per_activity: u32,
}

impl Default for VrPriceTable {
    fn default() -> Self {
        VrPriceTable {
            base_price: DEFAULT_VR_BASE_PRICE,
            per_activity: DEFAULT_VR_ACTIVITY_PRICE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VrRequest {
    pub flight: String,
    pub headset: Headset,
    pub slot: TimeSlot,
    pub activities: BTreeSet<VrActivity>,
}

impl VrRequest {
    pub fn new(flight: impl Into<String>) -> Self {
        VrRequest {
            flight: flight.into(),
            headset: Headset::default(),
            slot: TimeSlot::default(),
            activities: BTreeSet::from([VrActivity::PlanActivities]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VrQuote {
    pub base_price: u32,
    pub headset_fee: u32,
    pub slot_fee: u32,
    pub activity_fee: u32,
    pub total: u32,
}

/// Prices a VR booking; the first activity is part of the base price.
pub fn quote(prices: &VrPriceTable, request: &VrRequest) -> Result<VrQuote, ValidationError> {
    if request.flight.trim().is_empty() {
        return Err(ValidationError::MissingField("flight".to_string()));
    }

    let out_of_range = || ValidationError::AmountOutOfRange {
        field: "vr_prices".to_string(),
        value: format!("{:?}", prices),
    };

    let extra_activities = request.activities.len().saturating_sub(1) as u32;
    let activity_fee = extra_activities
        .checked_mul(prices.per_activity)
        .ok_or_else(out_of_range)?;
    let headset_fee = request.headset.fee();
    let slot_fee = request.slot.fee();
    let total = [headset_fee, slot_fee, activity_fee]
        .into_iter()
        .try_fold(prices.base_price, |acc, fee| acc.checked_add(fee))
        .ok_or_else(out_of_range)?;

    debug!(
        flight = %request.flight,
        headset = request.headset.label(),
        slot = request.slot.label(),
        activities = request.activities.len(),
        total,
        "Computed VR price"
    );

    Ok(VrQuote {
        base_price: prices.base_price,
        headset_fee,
        slot_fee,
        activity_fee,
        total,
    })
}
