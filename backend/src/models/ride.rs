//! Ride model
//!
//! A ride moves one bike from a start station to an end station over a fixed
//! time span. Rides are immutable once built; the simulation refers to them by
//! [`RideId`].

use crate::models::drawable::{Drawable, Position, Sprite};
use crate::models::station::Station;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Index of a ride within the simulation's ride list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RideId(pub usize);

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ride_{:06}", self.0)
    }
}

/// Errors that can occur when building a ride
#[derive(Debug, Error, PartialEq)]
pub enum RideError {
    #[error("Ride from {start_station} ends at {end_time}, not after its start at {start_time}")]
    EndsBeforeStart {
        start_station: String,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    },
}

/// A single trip between two stations
///
/// The ride keeps the ids of both stations (the simulation owns the stations
/// themselves) and a copy of their locations, which never change.
///
/// # Example
/// ```
/// use bikeshare_simulator_core_rs::{Position, Ride, Station};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
/// let a = Station::new("1".into(), "A".into(), Position::new(0.0, 0.0), 10, 5);
/// let b = Station::new("2".into(), "B".into(), Position::new(1.0, 2.0), 10, 5);
///
/// let ride = Ride::new(
///     &a,
///     &b,
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(8, 10, 0).unwrap(),
/// );
/// assert_eq!(ride.start_station(), "1");
/// assert_eq!(ride.duration().num_minutes(), 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RideRecord")]
pub struct Ride {
    /// Id of the station the ride leaves from
    start_station: String,

    /// Id of the station the ride arrives at
    end_station: String,

    /// Location of the start station
    origin: Position,

    /// Location of the end station
    destination: Position,

    start_time: NaiveDateTime,

    end_time: NaiveDateTime,
}

impl Ride {
    /// Create a new ride between two stations
    ///
    /// # Panics
    /// Panics if `start_time >= end_time`
    pub fn new(
        start: &Station,
        end: &Station,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        assert!(start_time < end_time, "ride must end after it starts");
        Self {
            start_station: start.id().to_string(),
            end_station: end.id().to_string(),
            origin: start.location(),
            destination: end.location(),
            start_time,
            end_time,
        }
    }

    pub fn start_station(&self) -> &str {
        &self.start_station
    }

    pub fn end_station(&self) -> &str {
        &self.end_station
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn destination(&self) -> Position {
        self.destination
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Whether `time` falls within `[start_time, end_time]`
    pub fn is_in_progress(&self, time: NaiveDateTime) -> bool {
        self.start_time <= time && time <= self.end_time
    }
}

/// Serialized form of a [`Ride`], checked before it becomes one
#[derive(Deserialize)]
struct RideRecord {
    start_station: String,
    end_station: String,
    origin: Position,
    destination: Position,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
}

impl TryFrom<RideRecord> for Ride {
    type Error = RideError;

    fn try_from(record: RideRecord) -> Result<Self, Self::Error> {
        if record.start_time >= record.end_time {
            return Err(RideError::EndsBeforeStart {
                start_station: record.start_station,
                start_time: record.start_time,
                end_time: record.end_time,
            });
        }
        Ok(Self {
            start_station: record.start_station,
            end_station: record.end_station,
            origin: record.origin,
            destination: record.destination,
            start_time: record.start_time,
            end_time: record.end_time,
        })
    }
}

impl Drawable for Ride {
    fn sprite(&self) -> Sprite {
        Sprite::Ride
    }

    /// Linear interpolation between the two stations at constant speed.
    ///
    /// Times outside the ride's span extrapolate along the same line; the
    /// result is not clamped to the endpoints.
    fn position_at(&self, time: NaiveDateTime) -> Position {
        let span = self.duration().num_milliseconds() as f64;
        let elapsed = (time - self.start_time).num_milliseconds() as f64;
        let fraction = elapsed / span;

        Position::new(
            self.origin.longitude + (self.destination.longitude - self.origin.longitude) * fraction,
            self.origin.latitude + (self.destination.latitude - self.origin.latitude) * fraction,
        )
    }
}
