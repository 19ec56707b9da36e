//! Scheduled ride events
//!
//! A ride passes through two scheduled events: `RideStart` at its start time
//! and `RideEnd` at its end time. The simulation queue orders them by
//! timestamp; processing a `RideStart` spawns the matching `RideEnd`.

use crate::models::ride::{Ride, RideId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An event scheduled in the simulation queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RideEvent {
    /// The ride leaves its start station
    RideStart { time: NaiveDateTime, ride: RideId },

    /// The ride reaches its end station
    RideEnd { time: NaiveDateTime, ride: RideId },
}

impl RideEvent {
    /// Start event for `ride`, scheduled at the ride's start time
    pub fn start(id: RideId, ride: &Ride) -> Self {
        RideEvent::RideStart {
            time: ride.start_time(),
            ride: id,
        }
    }

    /// End event for `ride`, scheduled at the ride's end time
    pub fn end(id: RideId, ride: &Ride) -> Self {
        RideEvent::RideEnd {
            time: ride.end_time(),
            ride: id,
        }
    }

    /// Simulated time at which the event is due
    pub fn time(&self) -> NaiveDateTime {
        match self {
            RideEvent::RideStart { time, .. } | RideEvent::RideEnd { time, .. } => *time,
        }
    }

    pub fn ride(&self) -> RideId {
        match self {
            RideEvent::RideStart { ride, .. } | RideEvent::RideEnd { ride, .. } => *ride,
        }
    }

    /// Whether the event is due at simulated time `now`
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.time() <= now
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            RideEvent::RideStart { .. } => "RideStart",
            RideEvent::RideEnd { .. } => "RideEnd",
        }
    }
}
