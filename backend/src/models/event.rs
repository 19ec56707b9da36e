//! Event logging for auditing and analysing a simulation run.
//!
//! This module defines the Event enum which captures every station state change
//! made while processing rides. Events enable:
//! - Debugging (understand what happened and when)
//! - Auditing (verify bike counts against ride outcomes)
//! - Analysis (extract per-station activity patterns)
//!
//! These are log records, not the scheduled ride events that drive the
//! simulation; see [`crate::events`] for those.
//!
//! # Example
//!
//! ```rust
//! use bikeshare_simulator_core_rs::models::{Event, EventLog, RideId};
//! use chrono::NaiveDate;
//!
//! let time = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap().and_hms_opt(9, 31, 0).unwrap();
//! let mut log = EventLog::new();
//! log.log(Event::RideStarted {
//!     time,
//!     ride: RideId(0),
//!     station_id: "6091".to_string(),
//!     bikes_remaining: 7,
//! });
//!
//! assert_eq!(log.events_of_type("RideStarted").len(), 1);
//! ```

use crate::models::ride::RideId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
///
/// Events are logged in the order they are processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A bike left its start station
    RideStarted {
        time: NaiveDateTime,
        ride: RideId,
        station_id: String,
        bikes_remaining: u32,
    },

    /// The start station had no bike; the ride never left
    RideDropped {
        time: NaiveDateTime,
        ride: RideId,
        station_id: String,
    },

    /// A ride arrived at its end station
    RideEnded {
        time: NaiveDateTime,
        ride: RideId,
        station_id: String,
        bikes_docked: u32,
    },

    /// A ride arrived at a full station and its bike could not be docked
    BikeLost {
        time: NaiveDateTime,
        ride: RideId,
        station_id: String,
    },

    /// The renderer asked the run to stop
    RenderStopRequested { time: NaiveDateTime },
}

impl Event {
    /// Simulated time at which this event occurred
    pub fn time(&self) -> NaiveDateTime {
        match self {
            Event::RideStarted { time, .. } => *time,
            Event::RideDropped { time, .. } => *time,
            Event::RideEnded { time, .. } => *time,
            Event::BikeLost { time, .. } => *time,
            Event::RenderStopRequested { time } => *time,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::RideStarted { .. } => "RideStarted",
            Event::RideDropped { .. } => "RideDropped",
            Event::RideEnded { .. } => "RideEnded",
            Event::BikeLost { .. } => "BikeLost",
            Event::RenderStopRequested { .. } => "RenderStopRequested",
        }
    }

    /// Ride this event relates to, if any
    pub fn ride(&self) -> Option<RideId> {
        match self {
            Event::RideStarted { ride, .. }
            | Event::RideDropped { ride, .. }
            | Event::RideEnded { ride, .. }
            | Event::BikeLost { ride, .. } => Some(*ride),
            Event::RenderStopRequested { .. } => None,
        }
    }

    /// Station this event relates to, if any
    pub fn station_id(&self) -> Option<&str> {
        match self {
            Event::RideStarted { station_id, .. }
            | Event::RideDropped { station_id, .. }
            | Event::RideEnded { station_id, .. }
            | Event::BikeLost { station_id, .. } => Some(station_id),
            Event::RenderStopRequested { .. } => None,
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events that occurred at exactly `time`
    pub fn events_at(&self, time: NaiveDateTime) -> Vec<&Event> {
        self.events.iter().filter(|e| e.time() == time).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific station
    pub fn events_for_station(&self, station_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.station_id() == Some(station_id))
            .collect()
    }

    /// Get events for a specific ride
    pub fn events_for_ride(&self, ride: RideId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.ride() == Some(ride))
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
