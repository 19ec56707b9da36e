//! Snapshot - read-only view of station state
//!
//! Captures the station counters of a run as plain data that can be
//! serialized, compared across runs, or handed to another thread once the run
//! is finished.
//!
//! # Critical Invariants
//!
//! - **Dock Bounds**: `num_bikes <= capacity` for every station
//! - **Unique Ids**: No station id appears twice

use crate::models::drawable::Position;
use crate::models::station::Station;
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Station state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub id: String,
    pub name: String,
    pub location: Position,
    pub capacity: u32,
    pub num_bikes: u32,
    pub rides_started: u64,
    pub rides_ended: u64,
    pub time_low_availability: u64,
    pub time_low_unoccupied: u64,
}

impl From<&Station> for StationSnapshot {
    fn from(station: &Station) -> Self {
        StationSnapshot {
            id: station.id().to_string(),
            name: station.name().to_string(),
            location: station.location(),
            capacity: station.capacity(),
            num_bikes: station.num_bikes(),
            rides_started: station.rides_started(),
            rides_ended: station.rides_ended(),
            time_low_availability: station.time_low_availability(),
            time_low_unoccupied: station.time_low_unoccupied(),
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate snapshot integrity
///
/// Checks critical invariants:
/// - Dock bounds
/// - Station id uniqueness
pub fn validate_snapshots(snapshots: &[StationSnapshot]) -> Result<(), SimulationError> {
    let mut seen = HashSet::new();

    for snapshot in snapshots {
        if snapshot.num_bikes > snapshot.capacity {
            return Err(SimulationError::StateValidationError(format!(
                "Station {} holds {} bikes with {} docks",
                snapshot.id, snapshot.num_bikes, snapshot.capacity
            )));
        }

        if !seen.insert(snapshot.id.as_str()) {
            return Err(SimulationError::StateValidationError(format!(
                "Duplicate station id in snapshot: {}",
                snapshot.id
            )));
        }
    }

    Ok(())
}
