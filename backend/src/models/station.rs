//! Station model
//!
//! Represents a docking station in the bike-share network.
//! Each station has:
//! - A fixed location (longitude, latitude) and dock capacity
//! - A current bike count
//! - Cumulative usage statistics (rides started/ended, time spent short on
//!   bikes or short on open docks)
//!
//! CRITICAL: `0 <= num_bikes <= capacity` at all times

use crate::models::drawable::{Drawable, Position, Sprite};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bike count at or below which a station has low availability
pub const DEFAULT_LOW_AVAILABILITY_THRESHOLD: u32 = 5;

/// Default open-dock count at or below which a station is nearly full
pub const DEFAULT_LOW_UNOCCUPIED_THRESHOLD: u32 = 5;

/// Errors that can occur when building a station
#[derive(Debug, Error, PartialEq)]
pub enum StationError {
    #[error("Station {id} has {num_bikes} bikes but only {capacity} docks")]
    BikesExceedCapacity {
        id: String,
        num_bikes: u32,
        capacity: u32,
    },
}

/// Thresholds used when sampling station occupancy each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyThresholds {
    /// Bike count at or below which the station counts as low availability
    pub low_availability: u32,
    /// Open docks at or below which the station counts as low unoccupied
    pub low_unoccupied: u32,
}

impl Default for OccupancyThresholds {
    fn default() -> Self {
        Self {
            low_availability: DEFAULT_LOW_AVAILABILITY_THRESHOLD,
            low_unoccupied: DEFAULT_LOW_UNOCCUPIED_THRESHOLD,
        }
    }
}

/// A bike-share docking station
///
/// # Example
/// ```
/// use bikeshare_simulator_core_rs::{Position, Station};
///
/// let station = Station::new(
///     "6023".to_string(),
///     "de la Commune / Berri".to_string(),
///     Position::new(-73.54983, 45.51086),
///     39, // capacity
///     18, // bikes docked
/// );
/// assert_eq!(station.open_docks(), 21);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StationRecord")]
pub struct Station {
    /// External station identifier (dataset key)
    id: String,

    /// Human-readable station name
    name: String,

    /// Station location, longitude first
    location: Position,

    /// Total number of docks
    capacity: u32,

    /// Bikes currently docked
    num_bikes: u32,

    /// Rides that started from this station
    rides_started: u64,

    /// Rides that ended at this station
    rides_ended: u64,

    /// Seconds spent with low bike availability
    time_low_availability: u64,

    /// Seconds spent with few open docks
    time_low_unoccupied: u64,
}

impl Station {
    /// Create a new station with zeroed statistics
    ///
    /// # Panics
    /// Panics if `num_bikes > capacity`
    pub fn new(
        id: String,
        name: String,
        location: Position,
        capacity: u32,
        num_bikes: u32,
    ) -> Self {
        assert!(
            num_bikes <= capacity,
            "num_bikes must not exceed capacity"
        );
        Self {
            id,
            name,
            location,
            capacity,
            num_bikes,
            rides_started: 0,
            rides_ended: 0,
            time_low_availability: 0,
            time_low_unoccupied: 0,
        }
    }

    /// Create a new station, rejecting a bike count above capacity
    pub fn try_new(
        id: String,
        name: String,
        location: Position,
        capacity: u32,
        num_bikes: u32,
    ) -> Result<Self, StationError> {
        if num_bikes > capacity {
            return Err(StationError::BikesExceedCapacity {
                id,
                num_bikes,
                capacity,
            });
        }
        Ok(Self::new(id, name, location, capacity, num_bikes))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Position {
        self.location
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn num_bikes(&self) -> u32 {
        self.num_bikes
    }

    /// Docks not currently holding a bike
    pub fn open_docks(&self) -> u32 {
        self.capacity - self.num_bikes
    }

    pub fn rides_started(&self) -> u64 {
        self.rides_started
    }

    pub fn rides_ended(&self) -> u64 {
        self.rides_ended
    }

    /// Seconds spent at or below the low-availability threshold
    pub fn time_low_availability(&self) -> u64 {
        self.time_low_availability
    }

    /// Seconds spent at or below the low-unoccupied threshold
    pub fn time_low_unoccupied(&self) -> u64 {
        self.time_low_unoccupied
    }

    /// Accumulate occupancy statistics for one tick
    ///
    /// Both conditions are checked independently; a small station can be
    /// short on bikes and short on docks during the same tick.
    ///
    /// # Example
    /// ```
    /// use bikeshare_simulator_core_rs::{OccupancyThresholds, Position, Station};
    ///
    /// let mut station = Station::new(
    ///     "1".to_string(), "Tiny".to_string(), Position::new(0.0, 0.0), 8, 3,
    /// );
    /// station.sample_occupancy(60, OccupancyThresholds::default());
    /// assert_eq!(station.time_low_availability(), 60);
    /// assert_eq!(station.time_low_unoccupied(), 60);
    /// ```
    pub fn sample_occupancy(&mut self, elapsed_seconds: u64, thresholds: OccupancyThresholds) {
        if self.num_bikes <= thresholds.low_availability {
            self.time_low_availability += elapsed_seconds;
        }
        if self.open_docks() <= thresholds.low_unoccupied {
            self.time_low_unoccupied += elapsed_seconds;
        }
    }

    /// Remove one bike if any is docked
    ///
    /// Returns `false` and leaves the count untouched when the station is empty.
    pub fn take_bike(&mut self) -> bool {
        if self.num_bikes == 0 {
            return false;
        }
        self.num_bikes -= 1;
        true
    }

    /// Dock one bike if a dock is free
    ///
    /// Returns `false` and leaves the count untouched when the station is full.
    pub fn return_bike(&mut self) -> bool {
        if self.num_bikes >= self.capacity {
            return false;
        }
        self.num_bikes += 1;
        true
    }

    pub fn record_ride_start(&mut self) {
        self.rides_started += 1;
    }

    pub fn record_ride_end(&mut self) {
        self.rides_ended += 1;
    }
}

/// Serialized form of a [`Station`], checked before it becomes one
#[derive(Deserialize)]
struct StationRecord {
    id: String,
    name: String,
    location: Position,
    capacity: u32,
    num_bikes: u32,
    #[serde(default)]
    rides_started: u64,
    #[serde(default)]
    rides_ended: u64,
    #[serde(default)]
    time_low_availability: u64,
    #[serde(default)]
    time_low_unoccupied: u64,
}

impl TryFrom<StationRecord> for Station {
    type Error = StationError;

    fn try_from(record: StationRecord) -> Result<Self, Self::Error> {
        let mut station = Station::try_new(
            record.id,
            record.name,
            record.location,
            record.capacity,
            record.num_bikes,
        )?;
        station.rides_started = record.rides_started;
        station.rides_ended = record.rides_ended;
        station.time_low_availability = record.time_low_availability;
        station.time_low_unoccupied = record.time_low_unoccupied;
        Ok(station)
    }
}

impl Drawable for Station {
    fn sprite(&self) -> Sprite {
        Sprite::Station
    }

    /// Stations never move; `time` is ignored.
    fn position_at(&self, _time: NaiveDateTime) -> Position {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(capacity: u32, num_bikes: u32) -> Station {
        Station::new(
            "s1".to_string(),
            "Test".to_string(),
            Position::new(-73.5, 45.5),
            capacity,
            num_bikes,
        )
    }

    #[test]
    #[should_panic(expected = "num_bikes must not exceed capacity")]
    fn test_overfull_station_panics() {
        station(10, 11);
    }

    #[test]
    fn test_try_new_rejects_overfull() {
        let err = Station::try_new(
            "s1".to_string(),
            "Test".to_string(),
            Position::new(0.0, 0.0),
            10,
            11,
        )
        .unwrap_err();
        assert_eq!(
            err,
            StationError::BikesExceedCapacity {
                id: "s1".to_string(),
                num_bikes: 11,
                capacity: 10,
            }
        );
    }

    #[test]
    fn test_deserialize_rejects_overfull_station() {
        let json = r#"{"id": "s1", "name": "Test", "location": {"longitude": 0.0, "latitude": 0.0},
                       "capacity": 3, "num_bikes": 9}"#;
        let err = serde_json::from_str::<Station>(json).unwrap_err();
        assert!(err.to_string().contains("9 bikes but only 3 docks"));
    }

    #[test]
    fn test_deserialize_keeps_counters() {
        let mut original = station(10, 4);
        original.record_ride_start();
        original.sample_occupancy(60, OccupancyThresholds::default());

        let json = serde_json::to_string(&original).unwrap();
        let restored: Station = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.num_bikes(), 4);
        assert_eq!(restored.rides_started(), 1);
        assert_eq!(restored.time_low_availability(), 60);
    }

    #[test]
    fn test_take_bike_stops_at_zero() {
        let mut s = station(10, 1);
        assert!(s.take_bike());
        assert!(!s.take_bike());
        assert_eq!(s.num_bikes(), 0);
    }

    #[test]
    fn test_return_bike_stops_at_capacity() {
        let mut s = station(2, 1);
        assert!(s.return_bike());
        assert!(!s.return_bike());
        assert_eq!(s.num_bikes(), 2);
    }

    #[test]
    fn test_sampling_healthy_station_accumulates_nothing() {
        let mut s = station(30, 15);
        s.sample_occupancy(60, OccupancyThresholds::default());
        assert_eq!(s.time_low_availability(), 0);
        assert_eq!(s.time_low_unoccupied(), 0);
    }

    #[test]
    fn test_sampling_thresholds_are_inclusive() {
        let mut s = station(20, 5);
        s.sample_occupancy(60, OccupancyThresholds::default());
        assert_eq!(s.time_low_availability(), 60);
        assert_eq!(s.time_low_unoccupied(), 0);

        let mut full = station(20, 15);
        full.sample_occupancy(60, OccupancyThresholds::default());
        assert_eq!(full.time_low_availability(), 0);
        assert_eq!(full.time_low_unoccupied(), 60);
    }
}
