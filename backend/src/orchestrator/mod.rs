//! Orchestrator - main simulation loop
//!
//! Implements the tick loop tying stations, rides, the event queue and the
//! renderer together.
//!
//! See `engine.rs` for full implementation.

pub mod engine;
pub mod snapshot;

// Re-export main types for convenience
pub use engine::{RunSummary, Simulation, SimulationConfig, SimulationError, TickResult};

// Re-export snapshot types
pub use snapshot::{validate_snapshots, StationSnapshot};
