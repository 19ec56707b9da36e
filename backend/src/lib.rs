//! Bike-Share Simulator Core - Rust Engine
//!
//! Discrete-event simulator for a bike-share network: stations with finite
//! docks, rides moving bikes between them, and per-station usage statistics.
//!
//! # Architecture
//!
//! - **core**: Time management
//! - **models**: Domain types (Station, Ride, SimulationState, event log)
//! - **events**: Ride start/end events and the priority queue ordering them
//! - **orchestrator**: Main simulation loop
//! - **statistics**: Per-station maxima report
//! - **render**: Interface to the rendering collaborator
//! - **loader**: Station JSON and ride CSV parsing
//!
//! # Critical Invariants
//!
//! 1. Every station keeps `0 <= num_bikes <= capacity`
//! 2. Events are processed in timestamp order, FIFO among equal timestamps
//! 3. All events due at a tick are drained before sampling the next tick

// Module declarations
pub mod core;
pub mod events;
pub mod loader;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod statistics;

// Re-exports for convenience
pub use crate::core::time::TimeManager;
pub use events::{PriorityQueue, RideEvent};
pub use loader::LoadError;
pub use models::{
    drawable::{Drawable, Position, Sprite},
    event::{Event, EventLog},
    ride::{Ride, RideError, RideId},
    state::SimulationState,
    station::{OccupancyThresholds, Station, StationError},
};
pub use orchestrator::{
    RunSummary, Simulation, SimulationConfig, SimulationError, StationSnapshot, TickResult,
};
pub use render::{Frame, FrameRecord, HeadlessRenderer, RecordingRenderer, RenderControl, Renderer};
pub use statistics::{StatKind, StationStat, Statistics};
