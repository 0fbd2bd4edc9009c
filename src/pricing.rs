//! Flight price estimate shown on the booking screen

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;

/// One-way fare per passenger before any multiplier
pub const DEFAULT_BASE_FARE: f64 = 220.0;

/// Price of each add-on after the first, which is free
pub const DEFAULT_ADD_ON_UNIT_PRICE: u32 = 8;

pub const MIN_PASSENGERS: u32 = 1;
pub const MAX_PASSENGERS: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    #[default]
    RoundTrip,
}

impl TripType {
    pub fn multiplier(&self) -> f64 {
        match self {
            TripType::OneWay => 1.0,
            TripType::RoundTrip => 1.8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "One way",
            TripType::RoundTrip => "Round trip",
        }
    }
}

impl FromStr for TripType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "one-way" | "oneway" => Ok(TripType::OneWay),
            "round-trip" | "roundtrip" | "return" => Ok(TripType::RoundTrip),
            other => Err(ValidationError::InvalidFieldValue {
                field: "trip".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    #[default]
    Economy,
    Premium,
    Business,
    First,
}

impl CabinClass {
    pub const ALL: [CabinClass; 4] = [
        CabinClass::Economy,
        CabinClass::Premium,
        CabinClass::Business,
        CabinClass::First,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            CabinClass::Economy => 1.0,
            CabinClass::Premium => 1.4,
            CabinClass::Business => 2.2,
            CabinClass::First => 3.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::Premium => "Premium",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for CabinClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economy" => Ok(CabinClass::Economy),
            "premium" => Ok(CabinClass::Premium),
            "business" => Ok(CabinClass::Business),
            "first" => Ok(CabinClass::First),
            other => Err(ValidationError::InvalidFieldValue {
                field: "cabin".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Paid extras on top of the fare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlightAddOn {
    SeatSelection,
    FastSecurity,
    ExtraBag,
}

impl FlightAddOn {
    pub fn label(&self) -> &'static str {
        match self {
            FlightAddOn::SeatSelection => "Seat selection",
            FlightAddOn::FastSecurity => "Fast security",
            FlightAddOn::ExtraBag => "Extra bag",
        }
    }
}

impl FromStr for FlightAddOn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "seat-selection" | "seat" => Ok(FlightAddOn::SeatSelection),
            "fast-security" | "security" => Ok(FlightAddOn::FastSecurity),
            "extra-bag" | "bag" => Ok(FlightAddOn::ExtraBag),
            other => Err(ValidationError::InvalidFieldValue {
                field: "extra".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Fare inputs that stay fixed for a booking session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareTable {
    pub base_fare: f64,
    pub add_on_unit_price: u32,
}

impl Default for FareTable {
    fn default() -> Self {
        FareTable {
            base_fare: DEFAULT_BASE_FARE,
            add_on_unit_price: DEFAULT_ADD_ON_UNIT_PRICE,
        }
    }
}

/// What the traveller picked on the booking form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRequest {
    pub trip: TripType,
    pub cabin: CabinClass,
    pub passengers: u32,
    pub extras: BTreeSet<FlightAddOn>,
}

impl Default for FlightRequest {
    fn default() -> Self {
        FlightRequest {
            trip: TripType::RoundTrip,
            cabin: CabinClass::Economy,
            passengers: 1,
            extras: BTreeSet::from([FlightAddOn::SeatSelection]),
        }
    }
}

/// Itemised estimate, matching the lines of the price breakdown card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuote {
    pub base_fare: i64,
    pub trip_type_delta: i64,
    pub cabin_delta: i64,
    pub per_passenger: i64,
    pub passengers: u32,
    pub flight_subtotal: i64,
    pub add_on_cost: i64,
    pub total: i64,
}

/// Rounded fare for one passenger. Rounding happens here and nowhere else.
///
/// `None` when the fare does not fit a whole-dollar `i64`.
pub fn per_passenger_fare(base_fare: f64, trip: TripType, cabin: CabinClass) -> Option<i64> {
    to_whole_dollars(base_fare * trip.multiplier() * cabin.multiplier())
}

/// Cost of `extra_count` add-ons; the first one is free.
pub fn add_on_cost(extra_count: usize, unit_price: u32) -> i64 {
    let paid = i64::try_from(extra_count.saturating_sub(1)).unwrap_or(i64::MAX);
    paid.saturating_mul(i64::from(unit_price))
}

/// Bare estimate formula: `round(base × trip × cabin) × passengers` plus
/// paid add-ons. `None` on overflow.
pub fn estimate_total(
    base_fare: f64,
    trip: TripType,
    cabin: CabinClass,
    passengers: u32,
    extra_count: usize,
    unit_price: u32,
) -> Option<i64> {
    per_passenger_fare(base_fare, trip, cabin)?
        .checked_mul(i64::from(passengers))?
        .checked_add(add_on_cost(extra_count, unit_price))
}

fn to_whole_dollars(amount: f64) -> Option<i64> {
    let rounded = amount.round();
    // i64::MAX as f64 is 2^63, one past the largest representable value
    if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

/// Builds the full breakdown for a booking request.
///
/// Passenger count must be within the form's stepper range (1..=9).
pub fn quote(fares: &FareTable, request: &FlightRequest) -> Result<FlightQuote, ValidationError> {
    if !(MIN_PASSENGERS..=MAX_PASSENGERS).contains(&request.passengers) {
        return Err(ValidationError::InvalidPassengers(request.passengers));
    }
    if !fares.base_fare.is_finite() || fares.base_fare < 0.0 {
        return Err(ValidationError::InvalidFieldValue {
            field: "base_fare".to_string(),
            value: fares.base_fare.to_string(),
        });
    }

    let out_of_range = || ValidationError::AmountOutOfRange {
        field: "base_fare".to_string(),
        value: fares.base_fare.to_string(),
    };

    let base = fares.base_fare;
    let with_trip = base * request.trip.multiplier();
    let per_passenger = per_passenger_fare(base, request.trip, request.cabin).ok_or_else(out_of_range)?;
    let flight_subtotal = per_passenger
        .checked_mul(i64::from(request.passengers))
        .ok_or_else(out_of_range)?;
    let add_on_cost = add_on_cost(request.extras.len(), fares.add_on_unit_price);
    let total = flight_subtotal.checked_add(add_on_cost).ok_or_else(out_of_range)?;

    let quote = FlightQuote {
        base_fare: to_whole_dollars(base).ok_or_else(out_of_range)?,
        trip_type_delta: to_whole_dollars(with_trip - base).ok_or_else(out_of_range)?,
        cabin_delta: to_whole_dollars(with_trip * request.cabin.multiplier() - with_trip)
            .ok_or_else(out_of_range)?,
        per_passenger,
        passengers: request.passengers,
        flight_subtotal,
        add_on_cost,
        total,
    };

    debug!(
        trip = request.trip.label(),
        cabin = request.cabin.label(),
        passengers = request.passengers,
        extras = request.extras.len(),
        total = quote.total,
        "Computed flight estimate"
    );

    Ok(quote)
}
