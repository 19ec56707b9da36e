//! Ride event processing
//!
//! This module handles:
//! - Applying a ride event to station state
//! - Spawning follow-up events
//! - Logging every transition
//!
//! # Skip policy
//!
//! Bike counts never leave `[0, capacity]`. A ride starting at an empty
//! station is dropped: no bike leaves, no `RideEnd` is scheduled. A ride
//! ending at a full station still counts as ended, but its bike is not docked.

use crate::events::types::RideEvent;
use crate::models::event::{Event, EventLog};
use crate::models::ride::RideId;
use crate::models::state::SimulationState;
use chrono::NaiveDateTime;
use tracing::{trace, warn};

impl RideEvent {
    /// Apply this event to `state`, returning the events it spawns
    ///
    /// An event whose ride or station is missing from `state` changes nothing
    /// and spawns nothing.
    ///
    /// # Example
    /// ```
    /// use bikeshare_simulator_core_rs::{EventLog, Position, Ride, RideEvent, RideId, SimulationState, Station};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
    /// let a = Station::new("a".into(), "A".into(), Position::new(0.0, 0.0), 10, 5);
    /// let b = Station::new("b".into(), "B".into(), Position::new(1.0, 1.0), 10, 5);
    /// let ride = Ride::new(&a, &b, day.and_hms_opt(8, 0, 0).unwrap(), day.and_hms_opt(8, 5, 0).unwrap());
    /// let start = RideEvent::start(RideId(0), &ride);
    ///
    /// let mut state = SimulationState::new(vec![a, b], vec![ride]);
    /// let mut log = EventLog::new();
    ///
    /// let follow_ups = start.process(&mut state, &mut log);
    /// assert_eq!(follow_ups.len(), 1);
    /// assert_eq!(state.station("a").unwrap().num_bikes(), 4);
    /// ```
    pub fn process(&self, state: &mut SimulationState, log: &mut EventLog) -> Vec<RideEvent> {
        match *self {
            RideEvent::RideStart { time, ride } => process_ride_start(state, log, time, ride),
            RideEvent::RideEnd { time, ride } => process_ride_end(state, log, time, ride),
        }
    }
}

fn process_ride_start(
    state: &mut SimulationState,
    log: &mut EventLog,
    time: NaiveDateTime,
    id: RideId,
) -> Vec<RideEvent> {
    let Some(ride) = state.ride(id) else {
        warn!(ride = %id, "start event for unknown ride");
        return Vec::new();
    };
    let follow_up = RideEvent::end(id, ride);
    let station_id = ride.start_station().to_string();

    let Some(station) = state.station_mut(&station_id) else {
        warn!(ride = %id, station = %station_id, "ride starts at unknown station");
        return Vec::new();
    };

    station.record_ride_start();

    if !station.take_bike() {
        trace!(%time, ride = %id, station = %station_id, "no bike available, ride dropped");
        log.log(Event::RideDropped {
            time,
            ride: id,
            station_id,
        });
        return Vec::new();
    }

    let bikes_remaining = station.num_bikes();
    state.activate_ride(id);

    trace!(%time, ride = %id, station = %station_id, bikes_remaining, "ride started");
    log.log(Event::RideStarted {
        time,
        ride: id,
        station_id,
        bikes_remaining,
    });

    vec![follow_up]
}

fn process_ride_end(
    state: &mut SimulationState,
    log: &mut EventLog,
    time: NaiveDateTime,
    id: RideId,
) -> Vec<RideEvent> {
    let Some(ride) = state.ride(id) else {
        warn!(ride = %id, "end event for unknown ride");
        return Vec::new();
    };
    let station_id = ride.end_station().to_string();

    state.deactivate_ride(id);

    let Some(station) = state.station_mut(&station_id) else {
        warn!(ride = %id, station = %station_id, "ride ends at unknown station");
        return Vec::new();
    };

    station.record_ride_end();
    let docked = station.return_bike();
    let bikes_docked = station.num_bikes();

    if !docked {
        trace!(%time, ride = %id, station = %station_id, "station full, bike not docked");
        log.log(Event::BikeLost {
            time,
            ride: id,
            station_id: station_id.clone(),
        });
    }

    trace!(%time, ride = %id, station = %station_id, bikes_docked, "ride ended");
    log.log(Event::RideEnded {
        time,
        ride: id,
        station_id,
        bikes_docked,
    });

    Vec::new()
}
