//! Simulation Engine
//!
//! Main simulation loop integrating all components:
//! - Ride scheduling (seeding start events for the run window)
//! - Occupancy sampling (low availability / low unoccupied time)
//! - Event processing (ride starts and ends, in timestamp order)
//! - Rendering (one frame per tick)
//! - Event logging (complete run history)
//!
//! # Architecture
//!
//! ```text
//! run(start, end):
//!   seed RideStart for every ride with start < ride.start_time < end
//!   For each tick t (start + 1 min, start + 2 min, ... up to end):
//!   1. Sample occupancy of every station
//!   2. Drain every queued event due at or before t (including follow-ups)
//!   3. Render stations + rides in flight at t
//! ```
//!
//! # Example
//!
//! ```rust
//! use bikeshare_simulator_core_rs::{HeadlessRenderer, Position, Ride, Simulation, Station};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
//! let a = Station::new("a".into(), "Atwater".into(), Position::new(-73.58, 45.49), 20, 10);
//! let b = Station::new("b".into(), "Berri".into(), Position::new(-73.56, 45.51), 20, 10);
//! let ride = Ride::new(&a, &b, day.and_hms_opt(9, 31, 0).unwrap(), day.and_hms_opt(9, 40, 0).unwrap());
//!
//! let mut sim = Simulation::new(vec![a, b], vec![ride], HeadlessRenderer);
//! let summary = sim.run(day.and_hms_opt(9, 30, 0).unwrap(), day.and_hms_opt(9, 45, 0).unwrap());
//! assert_eq!(summary.ticks, 15);
//!
//! let stats = sim.calculate_statistics();
//! assert_eq!(stats.max_start.as_pair(), ("Atwater", 1));
//! assert_eq!(stats.max_end.as_pair(), ("Berri", 1));
//! ```

use crate::core::time::TimeManager;
use crate::events::{PriorityQueue, RideEvent};
use crate::models::event::{Event, EventLog};
use crate::models::ride::{Ride, RideId};
use crate::models::state::SimulationState;
use crate::models::station::{
    OccupancyThresholds, Station, DEFAULT_LOW_AVAILABILITY_THRESHOLD,
    DEFAULT_LOW_UNOCCUPIED_THRESHOLD,
};
use crate::orchestrator::snapshot::{validate_snapshots, StationSnapshot};
use crate::render::{Frame, HeadlessRenderer, RenderControl, Renderer};
use crate::statistics::Statistics;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

// ============================================================================
// Configuration Types
// ============================================================================

/// Simulation configuration
///
/// # Example
///
/// ```rust
/// use bikeshare_simulator_core_rs::SimulationConfig;
///
/// let config: SimulationConfig = serde_json::from_str(r#"{"tick_seconds": 30}"#).unwrap();
/// assert_eq!(config.tick_seconds, 30);
/// assert_eq!(config.low_availability_threshold, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds covered by one tick
    pub tick_seconds: i64,

    /// Bike count at or below which a station has low availability
    pub low_availability_threshold: u32,

    /// Open docks at or below which a station counts as low unoccupied
    pub low_unoccupied_threshold: u32,

    /// End the run early when the renderer returns [`RenderControl::Stop`]
    pub stop_on_render_request: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 60,
            low_availability_threshold: DEFAULT_LOW_AVAILABILITY_THRESHOLD,
            low_unoccupied_threshold: DEFAULT_LOW_UNOCCUPIED_THRESHOLD,
            stop_on_render_request: true,
        }
    }
}

impl SimulationConfig {
    /// Check the configuration for values the run loop cannot use
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.tick_seconds <= 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "tick_seconds must be positive, got {}",
                self.tick_seconds
            )));
        }
        if TimeDelta::try_seconds(self.tick_seconds).is_none() {
            return Err(SimulationError::InvalidConfig(format!(
                "tick_seconds out of range: {}",
                self.tick_seconds
            )));
        }
        Ok(())
    }

    /// Tick length as a duration
    pub fn tick(&self) -> TimeDelta {
        TimeDelta::seconds(self.tick_seconds)
    }

    pub fn thresholds(&self) -> OccupancyThresholds {
        OccupancyThresholds {
            low_availability: self.low_availability_threshold,
            low_unoccupied: self.low_unoccupied_threshold,
        }
    }
}

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Station state broke an invariant
    #[error("State validation error: {0}")]
    StateValidationError(String),
}

// ============================================================================
// Results
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Simulated time at the end of the tick
    pub time: NaiveDateTime,

    /// Queued events processed this tick
    pub events_processed: usize,

    /// Rides that left their station this tick
    pub rides_started: usize,

    /// Rides dropped for lack of a bike this tick
    pub rides_dropped: usize,

    /// Rides that reached their end station this tick
    pub rides_ended: usize,

    /// Rides in flight after the tick
    pub active_rides: usize,

    /// Renderer's answer for this tick's frame
    pub render_control: RenderControl,
}

/// Aggregate result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub ticks: usize,
    pub events_processed: usize,
    pub rides_seeded: usize,
    pub rides_started: usize,
    pub rides_dropped: usize,
    pub rides_ended: usize,
    pub stopped_early: bool,
}

impl RunSummary {
    fn new(start: NaiveDateTime, end: NaiveDateTime, rides_seeded: usize) -> Self {
        Self {
            start,
            end,
            ticks: 0,
            events_processed: 0,
            rides_seeded,
            rides_started: 0,
            rides_dropped: 0,
            rides_ended: 0,
            stopped_early: false,
        }
    }

    fn record(&mut self, tick: &TickResult) {
        self.ticks += 1;
        self.events_processed += tick.events_processed;
        self.rides_started += tick.rides_started;
        self.rides_dropped += tick.rides_dropped;
        self.rides_ended += tick.rides_ended;
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Main simulation managing station state and the tick loop
///
/// The Simulation owns all run state:
/// - Stations, rides and the active-ride table ([`SimulationState`])
/// - The event queue
/// - The event log
/// - The renderer
pub struct Simulation<R: Renderer = HeadlessRenderer> {
    /// Stations, rides, rides in flight
    state: SimulationState,

    /// Pending ride events ordered by timestamp, FIFO among equals
    queue: PriorityQueue<RideEvent, NaiveDateTime>,

    /// Complete history of state changes
    event_log: EventLog,

    config: SimulationConfig,

    renderer: R,

    /// Simulated time of the last completed tick
    current_time: Option<NaiveDateTime>,
}

impl<R: Renderer> Simulation<R> {
    /// Create a simulation with the default configuration
    ///
    /// Rides referencing unknown stations are dropped.
    pub fn new(stations: Vec<Station>, rides: Vec<Ride>, renderer: R) -> Self {
        Self::from_parts(
            SimulationConfig::default(),
            SimulationState::new(stations, rides),
            renderer,
        )
    }

    /// Create a simulation with a custom configuration
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidConfig`] if the configuration does
    /// not validate.
    pub fn with_config(
        config: SimulationConfig,
        stations: Vec<Station>,
        rides: Vec<Ride>,
        renderer: R,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self::from_parts(
            config,
            SimulationState::new(stations, rides),
            renderer,
        ))
    }

    fn from_parts(config: SimulationConfig, state: SimulationState, renderer: R) -> Self {
        debug!(
            stations = state.num_stations(),
            rides = state.num_rides(),
            tick_seconds = config.tick_seconds,
            "simulation created"
        );
        Self {
            state,
            queue: PriorityQueue::new(),
            event_log: EventLog::new(),
            config,
            renderer,
            current_time: None,
        }
    }

    // ========================================================================
    // Run loop
    // ========================================================================

    /// Run the simulation from `start` to `end`
    ///
    /// Only rides starting strictly inside `(start, end)` take part. A ride
    /// that starts in the window but ends after it is counted as started but
    /// never as ended. Station counters carry over between runs; the queue and
    /// the active-ride table are reset.
    pub fn run(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> RunSummary {
        let seeded = self.seed_queue(start, end);
        let mut time = TimeManager::new(start, end, self.config.tick());
        let mut summary = RunSummary::new(start, end, seeded);

        info!(%start, %end, rides_seeded = seeded, "run started");

        while let Some(elapsed) = time.advance_tick() {
            let result = self.tick(time.now(), elapsed);
            summary.record(&result);

            if result.render_control == RenderControl::Stop && self.config.stop_on_render_request {
                self.event_log
                    .log(Event::RenderStopRequested { time: result.time });
                summary.stopped_early = true;
                info!(time = %result.time, "renderer requested stop");
                break;
            }
        }

        info!(
            ticks = summary.ticks,
            events = summary.events_processed,
            rides_started = summary.rides_started,
            rides_ended = summary.rides_ended,
            "run finished"
        );
        summary
    }

    /// Reset the queue and schedule a start event for every ride in the window
    fn seed_queue(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> usize {
        self.queue.clear();
        self.state.clear_active_rides();

        for (id, ride) in self.state.rides_with_ids() {
            if start < ride.start_time() && ride.start_time() < end {
                self.queue.insert(RideEvent::start(id, ride), ride.start_time());
            }
        }
        self.queue.len()
    }

    /// Advance the simulation to `now`, covering `elapsed` of simulated time
    fn tick(&mut self, now: NaiveDateTime, elapsed: TimeDelta) -> TickResult {
        self.current_time = Some(now);

        // STEP 1: OCCUPANCY SAMPLING
        let elapsed_seconds = u64::try_from(elapsed.num_seconds()).unwrap_or(0);
        let thresholds = self.config.thresholds();
        for station in self.state.stations_mut() {
            station.sample_occupancy(elapsed_seconds, thresholds);
        }

        // STEP 2: EVENT PROCESSING
        let log_mark = self.event_log.len();
        let events_processed = self.drain_due_events(now);
        let (mut rides_started, mut rides_dropped, mut rides_ended) = (0, 0, 0);
        for event in &self.event_log.events()[log_mark..] {
            match event {
                Event::RideStarted { .. } => rides_started += 1,
                Event::RideDropped { .. } => rides_dropped += 1,
                Event::RideEnded { .. } => rides_ended += 1,
                Event::BikeLost { .. } | Event::RenderStopRequested { .. } => {}
            }
        }

        // STEP 3: RENDERING
        let frame = Frame::new(now, self.state.drawables());
        let render_control = self.renderer.render(&frame);

        TickResult {
            time: now,
            events_processed,
            rides_started,
            rides_dropped,
            rides_ended,
            active_rides: self.state.num_active_rides(),
            render_control,
        }
    }

    /// Process every queued event due at or before `now`
    ///
    /// Follow-up events that are already due are processed in the same pass.
    /// Events in the future stay queued.
    fn drain_due_events(&mut self, now: NaiveDateTime) -> usize {
        let mut processed = 0;

        while self.queue.peek_priority().is_some_and(|due| *due <= now) {
            let event = self.queue.pop_min();
            for follow_up in event.process(&mut self.state, &mut self.event_log) {
                let due = follow_up.time();
                self.queue.insert(follow_up, due);
            }
            processed += 1;
        }

        processed
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// Statistics report over all stations
    ///
    /// Pure; calling it repeatedly without an intervening run gives identical
    /// results.
    pub fn calculate_statistics(&self) -> Statistics {
        Statistics::from_stations(self.state.stations())
    }

    /// Read-only snapshot of every station, ordered by station id
    pub fn station_snapshots(&self) -> Vec<StationSnapshot> {
        self.state.stations().map(StationSnapshot::from).collect()
    }

    /// Check station invariants on the current state
    pub fn validate_state(&self) -> Result<(), SimulationError> {
        validate_snapshots(&self.station_snapshots())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.state.station(id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.state.stations()
    }

    pub fn rides(&self) -> &[Ride] {
        self.state.rides()
    }

    /// Ids of rides currently in flight
    pub fn active_rides(&self) -> Vec<RideId> {
        self.state.active_ride_ids().collect()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulated time of the last completed tick, if any tick has run
    pub fn current_time(&self) -> Option<NaiveDateTime> {
        self.current_time
    }

    /// Events still waiting in the queue
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
