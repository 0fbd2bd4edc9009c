// Integration tests for the flight estimate and VR price

use std::collections::BTreeSet;

use vair::config::Config;
use vair::pricing::{self, CabinClass, FareTable, FlightAddOn, FlightRequest, TripType};
use vair::vr::{self, Headset, TimeSlot, VrActivity, VrRequest};
use vair::ValidationError;

fn request(trip: TripType, cabin: CabinClass, passengers: u32, extras: &[FlightAddOn]) -> FlightRequest {
    FlightRequest {
        trip,
        cabin,
        passengers,
        extras: extras.iter().copied().collect(),
    }
}

#[test]
fn test_worked_example_total() {
    let req = request(
        TripType::RoundTrip,
        CabinClass::Business,
        2,
        &[FlightAddOn::SeatSelection, FlightAddOn::FastSecurity, FlightAddOn::ExtraBag],
    );
    let quote = pricing::quote(&FareTable::default(), &req).unwrap();
    assert_eq!(quote.per_passenger, 871);
    assert_eq!(quote.flight_subtotal, 1742);
    assert_eq!(quote.add_on_cost, 16);
    assert_eq!(quote.total, 1758);
}

#[test]
fn test_rounding_happens_once_per_passenger() {
    // 554.4 rounds to 554 before being multiplied, so 3 pax is 1662, not 1663
    let req = request(TripType::RoundTrip, CabinClass::Premium, 3, &[]);
    let quote = pricing::quote(&FareTable::default(), &req).unwrap();
    assert_eq!(quote.per_passenger, 554);
    assert_eq!(quote.total, 1662);
}

#[test]
fn test_one_way_first_class() {
    let req = request(TripType::OneWay, CabinClass::First, 1, &[FlightAddOn::ExtraBag]);
    let quote = pricing::quote(&FareTable::default(), &req).unwrap();
    assert_eq!(quote.trip_type_delta, 0);
    assert_eq!(quote.cabin_delta, 440);
    assert_eq!(quote.total, 660);
}

#[test]
fn test_custom_fare_table() {
    let fares = FareTable {
        base_fare: 100.0,
        add_on_unit_price: 5,
    };
    let req = request(
        TripType::OneWay,
        CabinClass::Economy,
        4,
        &[FlightAddOn::SeatSelection, FlightAddOn::ExtraBag],
    );
    let quote = pricing::quote(&fares, &req).unwrap();
    assert_eq!(quote.total, 405);
    assert_eq!(
        Some(quote.total),
        pricing::estimate_total(100.0, TripType::OneWay, CabinClass::Economy, 4, 2, 5)
    );
}

#[test]
fn test_bad_inputs_are_rejected() {
    let req = request(TripType::OneWay, CabinClass::Economy, 0, &[]);
    assert_eq!(
        pricing::quote(&FareTable::default(), &req),
        Err(ValidationError::InvalidPassengers(0))
    );

    let fares = FareTable {
        base_fare: -1.0,
        add_on_unit_price: 8,
    };
    let req = request(TripType::OneWay, CabinClass::Economy, 1, &[]);
    assert!(pricing::quote(&fares, &req).is_err());

    // Same input as `vair quote --base-fare 1e18 -c business -p 9`
    let fares = FareTable {
        base_fare: 1e18,
        add_on_unit_price: 8,
    };
    let req = request(TripType::RoundTrip, CabinClass::Business, 9, &[]);
    assert!(matches!(
        pricing::quote(&fares, &req),
        Err(ValidationError::AmountOutOfRange { .. })
    ));
}

#[test]
fn test_vr_quote_with_config_prices() {
    let config = Config::default();
    let req = VrRequest {
        flight: "RYD123 → ULH".to_string(),
        headset: Headset::Rent,
        slot: TimeSlot::FullFlight,
        activities: BTreeSet::from([
            VrActivity::PlanActivities,
            VrActivity::WatchMovies,
            VrActivity::ExploreDestination,
            VrActivity::PlayGames,
        ]),
    };
    let quote = vr::quote(&config.vr_prices, &req).unwrap();
    assert_eq!(quote.total, 20 + 8 + 10 + 6);
}
