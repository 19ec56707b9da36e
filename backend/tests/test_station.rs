//! Tests for Station docking and occupancy accounting

mod common;

use bikeshare_simulator_core_rs::{
    Drawable, HeadlessRenderer, OccupancyThresholds, Position, Simulation, Sprite, Station,
    StationError,
};
use common::{at, sample_stations, station};
use proptest::prelude::*;

#[test]
fn test_loaded_station_fields() {
    let stations = sample_stations();
    let commune = &stations["6023"];

    assert_eq!(commune.name(), "de la Commune / Berri");
    assert_eq!(commune.capacity(), 39);
    assert_eq!(commune.num_bikes(), 18);
    assert_eq!(commune.open_docks(), 21);
    assert_eq!(commune.rides_started(), 0);
    assert_eq!(commune.rides_ended(), 0);
}

#[test]
fn test_station_position_ignores_time() {
    let stations = sample_stations();
    let commune = &stations["6023"];
    let expected = Position::new(-73.54983, 45.51086);

    assert_eq!(commune.sprite(), Sprite::Station);
    assert_eq!(commune.position_at(at(0, 0, 0)), expected);
    assert_eq!(commune.position_at(at(12, 34, 56)), expected);
    assert_eq!(commune.position_at(at(23, 59, 59)).as_tuple(), (-73.54983, 45.51086));
}

#[test]
fn test_take_bike_stops_at_zero() {
    let mut s = station("1", "Empty soon", 10, 1);

    assert!(s.take_bike());
    assert_eq!(s.num_bikes(), 0);
    assert!(!s.take_bike());
    assert_eq!(s.num_bikes(), 0);
}

#[test]
fn test_return_bike_stops_at_capacity() {
    let mut s = station("1", "Full soon", 10, 9);

    assert!(s.return_bike());
    assert_eq!(s.num_bikes(), 10);
    assert!(!s.return_bike());
    assert_eq!(s.num_bikes(), 10);
}

#[test]
fn test_ride_counters_are_independent_of_docks() {
    let mut s = station("1", "Counter", 10, 0);
    s.record_ride_start();
    s.record_ride_start();
    s.record_ride_end();

    assert_eq!(s.rides_started(), 2);
    assert_eq!(s.rides_ended(), 1);
    assert_eq!(s.num_bikes(), 0);
}

#[test]
fn test_occupancy_thresholds_are_inclusive() {
    let thresholds = OccupancyThresholds::default();

    let mut at_limit = station("1", "Five bikes", 30, 5);
    at_limit.sample_occupancy(60, thresholds);
    assert_eq!(at_limit.time_low_availability(), 60);
    assert_eq!(at_limit.time_low_unoccupied(), 0);

    let mut above = station("2", "Six bikes", 30, 6);
    above.sample_occupancy(60, thresholds);
    assert_eq!(above.time_low_availability(), 0);

    let mut nearly_full = station("3", "Five docks", 30, 25);
    nearly_full.sample_occupancy(60, thresholds);
    assert_eq!(nearly_full.time_low_unoccupied(), 60);
    assert_eq!(nearly_full.time_low_availability(), 0);
}

#[test]
fn test_custom_thresholds() {
    let thresholds = OccupancyThresholds {
        low_availability: 0,
        low_unoccupied: 0,
    };
    let mut s = station("1", "Strict", 10, 1);
    s.sample_occupancy(60, thresholds);
    assert_eq!(s.time_low_availability(), 0);
    assert_eq!(s.time_low_unoccupied(), 0);

    s.take_bike();
    s.sample_occupancy(30, thresholds);
    assert_eq!(s.time_low_availability(), 30);
}

#[test]
fn test_try_new_rejects_overfull_station() {
    let err = Station::try_new(
        "7".to_string(),
        "Overfull".to_string(),
        Position::new(0.0, 0.0),
        4,
        5,
    )
    .unwrap_err();

    assert_eq!(
        err,
        StationError::BikesExceedCapacity {
            id: "7".to_string(),
            num_bikes: 5,
            capacity: 4,
        }
    );
}

#[test]
#[should_panic(expected = "num_bikes must not exceed capacity")]
fn test_new_panics_on_overfull_station() {
    station("7", "Overfull", 4, 5);
}

#[test]
fn test_deserialized_station_is_checked_against_capacity() {
    let json = r#"{
        "id": "7",
        "name": "Overfull",
        "location": {"longitude": -73.57, "latitude": 45.50},
        "capacity": 3,
        "num_bikes": 9
    }"#;

    assert!(serde_json::from_str::<Station>(json).is_err());
}

#[test]
fn test_deserialized_station_runs() {
    let json = r#"{
        "id": "7",
        "name": "Full",
        "location": {"longitude": -73.57, "latitude": 45.50},
        "capacity": 3,
        "num_bikes": 3
    }"#;
    let full: Station = serde_json::from_str(json).unwrap();
    let mut sim = Simulation::new(vec![full], Vec::new(), HeadlessRenderer);

    sim.run(at(9, 0, 0), at(9, 1, 0));

    let full = sim.station("7").unwrap();
    assert_eq!(full.open_docks(), 0);
    assert_eq!(full.time_low_unoccupied(), 60);
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Take,
    Return,
    Sample,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Take), Just(Op::Return), Just(Op::Sample)]
}

proptest! {
    /// No sequence of docking operations moves a station outside
    /// `[0, capacity]`.
    #[test]
    fn prop_bike_count_stays_in_bounds(
        capacity in 0u32..40,
        fill in 0u32..=40,
        ops in prop::collection::vec(op_strategy(), 0..300),
    ) {
        let mut s = station("p", "Prop", capacity, fill.min(capacity));

        for op in ops {
            let before = s.num_bikes();
            match op {
                Op::Take => {
                    let taken = s.take_bike();
                    prop_assert_eq!(taken, before > 0);
                }
                Op::Return => {
                    let docked = s.return_bike();
                    prop_assert_eq!(docked, before < capacity);
                }
                Op::Sample => s.sample_occupancy(60, OccupancyThresholds::default()),
            }
            prop_assert!(s.num_bikes() <= s.capacity());
            prop_assert_eq!(s.num_bikes() + s.open_docks(), s.capacity());
        }
    }
}
