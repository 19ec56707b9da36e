//! Shared fixtures for integration tests

#![allow(dead_code)]

use bikeshare_simulator_core_rs::loader::{load_rides_file, load_stations_file};
use bikeshare_simulator_core_rs::{Position, Ride, Station};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::path::PathBuf;

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn sample_stations() -> HashMap<String, Station> {
    load_stations_file(data_path("stations.json")).expect("fixture stations load")
}

/// Stations and rides from the fixture datasets
pub fn sample_dataset() -> (Vec<Station>, Vec<Ride>) {
    let stations = sample_stations();
    let rides = load_rides_file(data_path("sample_rides.csv"), &stations).expect("fixture rides load");
    (stations.into_values().collect(), rides)
}

/// 2017-06-01 at `h:m:s`
pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 6, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

pub fn station(id: &str, name: &str, capacity: u32, num_bikes: u32) -> Station {
    Station::new(
        id.to_string(),
        name.to_string(),
        Position::new(-73.57, 45.50),
        capacity,
        num_bikes,
    )
}
