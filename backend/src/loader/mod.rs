//! Dataset loading
//!
//! Builds in-memory stations and rides from the bike-share open data formats:
//!
//! - **Stations** (JSON): `{"stations": [{"n": id, "s": name, "la": lat,
//!   "lo": lon, "da": bikes, "ba": open docks}, ...]}`. Numeric fields may be
//!   strings or numbers. Capacity is `da + ba`.
//! - **Rides** (CSV, no header): `start time, start station id, end time,
//!   end station id[, ...]`, times as `YYYY-MM-DD HH:MM` (seconds optional).
//!
//! Rides referencing a station id that was not loaded are skipped silently.

use crate::models::drawable::Position;
use crate::models::ride::Ride;
use crate::models::station::{Station, StationError};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Timestamp format used in ride files
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Timestamp format with seconds, also accepted in ride files
pub const DATETIME_FORMAT_SECONDS: &str = "%Y-%m-%d %H:%M:%S";

/// Errors that can occur while loading datasets
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed station JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed ride CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Station {station}: field '{field}' is not a valid number: {value:?}")]
    InvalidNumber {
        station: String,
        field: &'static str,
        value: String,
    },

    #[error("Ride record {line}: invalid timestamp {value:?}")]
    InvalidTimestamp { line: u64, value: String },

    #[error("Ride record {line}: missing field '{field}'")]
    MissingField { line: u64, field: &'static str },

    #[error(transparent)]
    InvalidStation(#[from] StationError),
}

// ============================================================================
// Stations
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            RawValue::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX) => {
                Some(*n as u32)
            }
            RawValue::Number(_) => None,
            RawValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawStation {
    #[serde(rename = "n")]
    id: RawValue,
    #[serde(rename = "s")]
    name: String,
    #[serde(rename = "la")]
    latitude: RawValue,
    #[serde(rename = "lo")]
    longitude: RawValue,
    #[serde(rename = "da")]
    bikes: RawValue,
    #[serde(rename = "ba")]
    docks: RawValue,
}

#[derive(Debug, Deserialize)]
struct RawStationFile {
    stations: Vec<RawStation>,
}

impl RawStation {
    fn into_station(self) -> Result<Station, LoadError> {
        let id = self.id.as_text();
        let invalid = |field: &'static str, value: &RawValue| LoadError::InvalidNumber {
            station: id.clone(),
            field,
            value: value.as_text(),
        };

        let longitude = self
            .longitude
            .as_f64()
            .ok_or_else(|| invalid("lo", &self.longitude))?;
        let latitude = self
            .latitude
            .as_f64()
            .ok_or_else(|| invalid("la", &self.latitude))?;
        let bikes = self.bikes.as_u32().ok_or_else(|| invalid("da", &self.bikes))?;
        let docks = self.docks.as_u32().ok_or_else(|| invalid("ba", &self.docks))?;
        let capacity = bikes
            .checked_add(docks)
            .ok_or_else(|| invalid("ba", &self.docks))?;

        Ok(Station::try_new(
            id,
            self.name,
            Position::new(longitude, latitude),
            capacity,
            bikes,
        )?)
    }
}

/// Load stations from a JSON station feed
///
/// # Example
/// ```
/// use bikeshare_simulator_core_rs::loader::load_stations;
///
/// let json = r#"{"stations": [
///     {"n": "6023", "s": "de la Commune / Berri", "la": "45.51086", "lo": "-73.54983", "da": "18", "ba": "21"}
/// ]}"#;
/// let stations = load_stations(json.as_bytes()).unwrap();
/// assert_eq!(stations["6023"].capacity(), 39);
/// ```
pub fn load_stations<R: Read>(reader: R) -> Result<HashMap<String, Station>, LoadError> {
    let raw: RawStationFile = serde_json::from_reader(reader)?;

    let mut stations = HashMap::with_capacity(raw.stations.len());
    for raw_station in raw.stations {
        let station = raw_station.into_station()?;
        stations.insert(station.id().to_string(), station);
    }

    debug!(count = stations.len(), "loaded stations");
    Ok(stations)
}

/// Load stations from a JSON file on disk
pub fn load_stations_file(path: impl AsRef<Path>) -> Result<HashMap<String, Station>, LoadError> {
    let file = File::open(path)?;
    load_stations(BufReader::new(file))
}

// ============================================================================
// Rides
// ============================================================================

/// Parse a ride timestamp, with or without seconds
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, DATETIME_FORMAT_SECONDS))
        .ok()
}

/// Load rides from a headerless CSV ride file
///
/// Rides whose start or end station is missing from `stations` are skipped.
/// Rides that do not end after they start are skipped with a warning.
pub fn load_rides<R: Read>(
    reader: R,
    stations: &HashMap<String, Station>,
) -> Result<Vec<Ride>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rides = Vec::new();
    let mut unknown_station = 0usize;

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |i: usize, name: &'static str| {
            record
                .get(i)
                .ok_or(LoadError::MissingField { line, field: name })
        };
        let start_raw = field(0, "start_time")?;
        let start_id = field(1, "start_station")?;
        let end_raw = field(2, "end_time")?;
        let end_id = field(3, "end_station")?;

        let (Some(start), Some(end)) = (stations.get(start_id), stations.get(end_id)) else {
            unknown_station += 1;
            continue;
        };

        let start_time = parse_timestamp(start_raw).ok_or_else(|| LoadError::InvalidTimestamp {
            line,
            value: start_raw.to_string(),
        })?;
        let end_time = parse_timestamp(end_raw).ok_or_else(|| LoadError::InvalidTimestamp {
            line,
            value: end_raw.to_string(),
        })?;

        if start_time >= end_time {
            warn!(line, %start_time, %end_time, "skipping ride that does not end after it starts");
            continue;
        }

        rides.push(Ride::new(start, end, start_time, end_time));
    }

    debug!(
        count = rides.len(),
        skipped_unknown_station = unknown_station,
        "loaded rides"
    );
    Ok(rides)
}

/// Load rides from a CSV file on disk
pub fn load_rides_file(
    path: impl AsRef<Path>,
    stations: &HashMap<String, Station>,
) -> Result<Vec<Ride>, LoadError> {
    let file = File::open(path)?;
    load_rides(BufReader::new(file), stations)
}
