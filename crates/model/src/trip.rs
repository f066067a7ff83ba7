use serde::Serialize;
use utility::id::HasId;

/// A waypoint recorded along a trip.
/// Table: `trip_data`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripPoint {
    pub speed: f64,
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl TripPoint {
    pub fn new(speed: f64, distance: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            speed,
            distance,
            latitude,
            longitude,
        }
    }
}

impl HasId for TripPoint {
    type IdType = i64;
}
