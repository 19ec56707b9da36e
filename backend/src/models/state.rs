//! Simulation State
//!
//! Represents the complete state of the bike-share network during a run.
//! Contains all stations, all rides, and the set of rides currently in flight.
//!
//! # Critical Invariants
//!
//! 1. **Dock Bounds**: Every station keeps `0 <= num_bikes <= capacity`
//! 2. **Ride Validity**: Every ride references two stations present in the map
//! 3. **Stable Ride Ids**: The ride list never shrinks, so a [`RideId`] stays valid
//!
//! The active-ride table only feeds the renderer. Station counters remain the
//! source of truth for statistics.

use crate::models::drawable::Drawable;
use crate::models::ride::{Ride, RideId};
use crate::models::station::Station;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Complete simulation state
///
/// # Example
///
/// ```rust
/// use bikeshare_simulator_core_rs::{Position, Ride, SimulationState, Station};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
/// let a = Station::new("1".into(), "A".into(), Position::new(0.0, 0.0), 10, 5);
/// let b = Station::new("2".into(), "B".into(), Position::new(1.0, 1.0), 10, 5);
/// let ride = Ride::new(&a, &b, day.and_hms_opt(8, 0, 0).unwrap(), day.and_hms_opt(8, 5, 0).unwrap());
///
/// let state = SimulationState::new(vec![a, b], vec![ride]);
/// assert_eq!(state.num_stations(), 2);
/// assert_eq!(state.num_rides(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    /// All stations, indexed by station id
    stations: BTreeMap<String, Station>,

    /// All rides; a ride's position in this list is its [`RideId`]
    rides: Vec<Ride>,

    /// Rides that have started but not yet ended
    active_rides: BTreeSet<RideId>,
}

impl SimulationState {
    /// Create a new simulation state
    ///
    /// Rides referencing a station id not present in `stations` are dropped.
    /// If two stations share an id, the later one wins.
    pub fn new(stations: Vec<Station>, rides: Vec<Ride>) -> Self {
        let stations: BTreeMap<String, Station> = stations
            .into_iter()
            .map(|station| (station.id().to_string(), station))
            .collect();

        let total = rides.len();
        let rides: Vec<Ride> = rides
            .into_iter()
            .filter(|ride| {
                stations.contains_key(ride.start_station())
                    && stations.contains_key(ride.end_station())
            })
            .collect();

        if rides.len() < total {
            debug!(
                dropped = total - rides.len(),
                "dropped rides referencing unknown stations"
            );
        }

        Self {
            stations,
            rides,
            active_rides: BTreeSet::new(),
        }
    }

    /// Get reference to a station by id
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Get mutable reference to a station by id
    pub fn station_mut(&mut self, id: &str) -> Option<&mut Station> {
        self.stations.get_mut(id)
    }

    /// All stations, ordered by id
    pub fn stations(&self) -> impl Iterator<Item = &Station> + Clone {
        self.stations.values()
    }

    /// All stations, mutably, ordered by id
    pub fn stations_mut(&mut self) -> impl Iterator<Item = &mut Station> {
        self.stations.values_mut()
    }

    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    pub fn ride(&self, id: RideId) -> Option<&Ride> {
        self.rides.get(id.0)
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    /// All rides paired with their ids
    pub fn rides_with_ids(&self) -> impl Iterator<Item = (RideId, &Ride)> {
        self.rides
            .iter()
            .enumerate()
            .map(|(index, ride)| (RideId(index), ride))
    }

    pub fn num_rides(&self) -> usize {
        self.rides.len()
    }

    /// Mark a ride as in flight
    pub fn activate_ride(&mut self, id: RideId) {
        self.active_rides.insert(id);
    }

    /// Mark a ride as no longer in flight
    ///
    /// Returns whether the ride was active.
    pub fn deactivate_ride(&mut self, id: RideId) -> bool {
        self.active_rides.remove(&id)
    }

    pub fn is_active(&self, id: RideId) -> bool {
        self.active_rides.contains(&id)
    }

    /// Ids of rides currently in flight, in ascending order
    pub fn active_ride_ids(&self) -> impl Iterator<Item = RideId> + '_ {
        self.active_rides.iter().copied()
    }

    /// Rides currently in flight
    pub fn active_rides(&self) -> impl Iterator<Item = &Ride> {
        self.active_rides.iter().filter_map(|id| self.rides.get(id.0))
    }

    pub fn num_active_rides(&self) -> usize {
        self.active_rides.len()
    }

    pub fn clear_active_rides(&mut self) {
        self.active_rides.clear();
    }

    /// Everything the renderer should draw: all stations, then active rides
    pub fn drawables(&self) -> Vec<&dyn Drawable> {
        let mut drawables: Vec<&dyn Drawable> =
            Vec::with_capacity(self.stations.len() + self.active_rides.len());
        drawables.extend(self.stations.values().map(|s| s as &dyn Drawable));
        drawables.extend(self.active_rides().map(|r| r as &dyn Drawable));
        drawables
    }

    /// Total bikes docked across all stations
    pub fn total_docked_bikes(&self) -> u64 {
        self.stations.values().map(|s| u64::from(s.num_bikes())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drawable::{Position, Sprite};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 6, 1)
            .unwrap()
            .and_hms_opt(8, m, 0)
            .unwrap()
    }

    fn station(id: &str) -> Station {
        Station::new(id.into(), id.into(), Position::new(0.0, 0.0), 10, 5)
    }

    #[test]
    fn test_rides_with_unknown_stations_are_dropped() {
        let a = station("a");
        let b = station("b");
        let ghost = station("ghost");
        let rides = vec![
            Ride::new(&a, &b, at(0), at(5)),
            Ride::new(&a, &ghost, at(0), at(5)),
            Ride::new(&ghost, &b, at(0), at(5)),
        ];

        let state = SimulationState::new(vec![a, b], rides);
        assert_eq!(state.num_rides(), 1);
        assert_eq!(state.ride(RideId(0)).unwrap().end_station(), "b");
        assert!(state.ride(RideId(1)).is_none());
    }

    #[test]
    fn test_drawables_list_stations_before_rides() {
        let a = station("a");
        let b = station("b");
        let ride = Ride::new(&a, &b, at(0), at(5));
        let mut state = SimulationState::new(vec![a, b], vec![ride]);
        state.activate_ride(RideId(0));

        let sprites: Vec<Sprite> = state.drawables().iter().map(|d| d.sprite()).collect();
        assert_eq!(sprites, vec![Sprite::Station, Sprite::Station, Sprite::Ride]);

        assert!(state.deactivate_ride(RideId(0)));
        assert!(!state.deactivate_ride(RideId(0)));
        assert_eq!(state.drawables().len(), 2);
    }

    #[test]
    fn test_total_docked_bikes() {
        let state = SimulationState::new(vec![station("a"), station("b")], Vec::new());
        assert_eq!(state.total_docked_bikes(), 10);
    }
}
