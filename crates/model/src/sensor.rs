use serde::Serialize;
use utility::id::HasId;

/// A single speed and distance sample from the vehicle.
/// Table: `sensor_data`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    /// km/h
    pub speed: f64,
    /// meters
    pub distance: f64,
}

impl SensorReading {
    pub fn new(speed: f64, distance: f64) -> Self {
        Self { speed, distance }
    }
}

impl HasId for SensorReading {
    type IdType = i64;
}
