//! Station statistics
//!
//! After a run, four quantities are reported, each as the station holding the
//! maximum value:
//!
//! | key                         | quantity                                |
//! |-----------------------------|-----------------------------------------|
//! | `max_start`                 | rides started at the station            |
//! | `max_end`                   | rides ended at the station              |
//! | `max_time_low_availability` | seconds spent with few bikes            |
//! | `max_time_low_unoccupied`   | seconds spent with few open docks       |
//!
//! Ties go to the station whose name sorts first. Names compare byte-wise, so
//! digits sort before uppercase letters, which sort before lowercase letters.

use crate::models::station::Station;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four tracked per-station quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKind {
    MaxStart,
    MaxEnd,
    MaxTimeLowAvailability,
    MaxTimeLowUnoccupied,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::MaxStart,
        StatKind::MaxEnd,
        StatKind::MaxTimeLowAvailability,
        StatKind::MaxTimeLowUnoccupied,
    ];

    /// Report key for this quantity
    pub fn key(&self) -> &'static str {
        match self {
            StatKind::MaxStart => "max_start",
            StatKind::MaxEnd => "max_end",
            StatKind::MaxTimeLowAvailability => "max_time_low_availability",
            StatKind::MaxTimeLowUnoccupied => "max_time_low_unoccupied",
        }
    }

    /// Value of this quantity for `station`
    pub fn value_for(&self, station: &Station) -> u64 {
        match self {
            StatKind::MaxStart => station.rides_started(),
            StatKind::MaxEnd => station.rides_ended(),
            StatKind::MaxTimeLowAvailability => station.time_low_availability(),
            StatKind::MaxTimeLowUnoccupied => station.time_low_unoccupied(),
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A report key that names none of the four quantities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown statistic key: {0}")]
pub struct UnknownStatKey(pub String);

impl FromStr for StatKind {
    type Err = UnknownStatKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| UnknownStatKey(s.to_string()))
    }
}

/// Station holding the maximum of one quantity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StationStat {
    pub station_name: String,
    pub value: u64,
}

impl StationStat {
    pub fn new(station_name: impl Into<String>, value: u64) -> Self {
        Self {
            station_name: station_name.into(),
            value,
        }
    }

    /// `(station name, value)` pair
    pub fn as_pair(&self) -> (&str, u64) {
        (&self.station_name, self.value)
    }
}

/// The four-key statistics report
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub max_start: StationStat,
    pub max_end: StationStat,
    pub max_time_low_availability: StationStat,
    pub max_time_low_unoccupied: StationStat,
}

impl Statistics {
    /// Aggregate the report over `stations`
    ///
    /// With no stations every entry is an empty name with value 0. Values are
    /// unsigned, so there is no `-1` "no station" marker; check for an empty
    /// `station_name` instead.
    pub fn from_stations<'a, I>(stations: I) -> Self
    where
        I: IntoIterator<Item = &'a Station> + Clone,
    {
        Self {
            max_start: find_max(stations.clone(), StatKind::MaxStart),
            max_end: find_max(stations.clone(), StatKind::MaxEnd),
            max_time_low_availability: find_max(stations.clone(), StatKind::MaxTimeLowAvailability),
            max_time_low_unoccupied: find_max(stations, StatKind::MaxTimeLowUnoccupied),
        }
    }

    pub fn get(&self, kind: StatKind) -> &StationStat {
        match kind {
            StatKind::MaxStart => &self.max_start,
            StatKind::MaxEnd => &self.max_end,
            StatKind::MaxTimeLowAvailability => &self.max_time_low_availability,
            StatKind::MaxTimeLowUnoccupied => &self.max_time_low_unoccupied,
        }
    }

    /// Look up an entry by its report key
    pub fn get_by_key(&self, key: &str) -> Option<&StationStat> {
        key.parse::<StatKind>().ok().map(|kind| self.get(kind))
    }

    /// All four entries in report order
    pub fn entries(&self) -> impl Iterator<Item = (StatKind, &StationStat)> {
        StatKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

impl std::ops::Index<StatKind> for Statistics {
    type Output = StationStat;

    fn index(&self, kind: StatKind) -> &StationStat {
        self.get(kind)
    }
}

/// Station with the largest value of `kind`; smallest name wins ties
pub fn find_max<'a, I>(stations: I, kind: StatKind) -> StationStat
where
    I: IntoIterator<Item = &'a Station>,
{
    let mut best: Option<(&str, u64)> = None;

    for station in stations {
        let value = kind.value_for(station);
        let name = station.name();
        let better = match best {
            None => true,
            Some((best_name, best_value)) => {
                value > best_value || (value == best_value && name < best_name)
            }
        };
        if better {
            best = Some((name, value));
        }
    }

    best.map(|(name, value)| StationStat::new(name, value))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drawable::Position;

    fn station(name: &str, starts: u64) -> Station {
        let mut s = Station::new(name.into(), name.into(), Position::new(0.0, 0.0), 10, 5);
        for _ in 0..starts {
            s.record_ride_start();
        }
        s
    }

    #[test]
    fn test_find_max_prefers_larger_value() {
        let stations = vec![station("A", 1), station("B", 3), station("C", 2)];
        assert_eq!(find_max(&stations, StatKind::MaxStart), StationStat::new("B", 3));
    }

    #[test]
    fn test_find_max_tie_goes_to_smallest_name() {
        let stations = vec![station("Berri", 2), station("10e Avenue", 2), station("Atwater", 2)];
        assert_eq!(
            find_max(&stations, StatKind::MaxStart),
            StationStat::new("10e Avenue", 2)
        );
    }

    #[test]
    fn test_find_max_empty_is_default() {
        let stations: Vec<Station> = Vec::new();
        assert_eq!(find_max(&stations, StatKind::MaxEnd), StationStat::default());
    }

    #[test]
    fn test_stat_kind_keys_round_trip() {
        for kind in StatKind::ALL {
            assert_eq!(kind.key().parse::<StatKind>(), Ok(kind));
        }
        assert!("max_nothing".parse::<StatKind>().is_err());
    }
}
