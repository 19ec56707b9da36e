//! Render-facing capability shared by stations and rides
//!
//! The rendering collaborator only needs two things from an entity: where it
//! is at a given time and which sprite to draw for it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Geographic position in degrees
///
/// Longitude comes first, matching the (x, y) convention of the map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// The position as a `(longitude, latitude)` pair
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

impl From<(f64, f64)> for Position {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

/// Visual identity of a drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sprite {
    Station,
    Ride,
}

impl Sprite {
    /// Image file the renderer draws for this sprite
    pub fn file_name(&self) -> &'static str {
        match self {
            Sprite::Station => "stationsprite.png",
            Sprite::Ride => "bikesprite.png",
        }
    }
}

/// An entity the renderer can place on the map
pub trait Drawable {
    /// Sprite used to draw this entity
    fn sprite(&self) -> Sprite;

    /// Position of this entity at `time`
    fn position_at(&self, time: NaiveDateTime) -> Position;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tuple_order() {
        let pos = Position::from((-73.54983, 45.51086));
        assert_eq!(pos.longitude, -73.54983);
        assert_eq!(pos.latitude, 45.51086);
        assert_eq!(pos.as_tuple(), (-73.54983, 45.51086));
    }

    #[test]
    fn test_sprite_files() {
        assert_eq!(Sprite::Station.file_name(), "stationsprite.png");
        assert_eq!(Sprite::Ride.file_name(), "bikesprite.png");
    }
}
