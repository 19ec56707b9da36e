//! Domain models for the bike-share simulator

pub mod drawable;
pub mod event;
pub mod ride;
pub mod state;
pub mod station;

// Re-exports
pub use drawable::{Drawable, Position, Sprite};
pub use event::{Event, EventLog};
pub use ride::{Ride, RideError, RideId};
pub use state::SimulationState;
pub use station::{OccupancyThresholds, Station, StationError};
