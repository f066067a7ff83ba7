use std::{error, fmt};

use model::{bounds, sensor::SensorReading, trip::TripPoint};

/// The first value that fell outside its accepted range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    Speed(f64),
    Distance(f64),
    Latitude(f64),
    Longitude(f64),
}

impl error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Speed(value) => write!(f, "speed out of range: {}", value),
            ValidationError::Distance(value) => {
                write!(f, "distance out of range: {}", value)
            }
            ValidationError::Latitude(value) => {
                write!(f, "latitude out of range: {}", value)
            }
            ValidationError::Longitude(value) => {
                write!(f, "longitude out of range: {}", value)
            }
        }
    }
}

pub fn check_sensor_reading(reading: &SensorReading) -> Result<(), ValidationError> {
    check_motion(reading.speed, reading.distance)
}

/// Checks speed, distance, latitude and longitude in that order.
pub fn check_trip_point(point: &TripPoint) -> Result<(), ValidationError> {
    check_motion(point.speed, point.distance)?;
    if !bounds::within(&bounds::LATITUDE, point.latitude) {
        return Err(ValidationError::Latitude(point.latitude));
    }
    if !bounds::within(&bounds::LONGITUDE, point.longitude) {
        return Err(ValidationError::Longitude(point.longitude));
    }
    Ok(())
}

fn check_motion(speed: f64, distance: f64) -> Result<(), ValidationError> {
    if !bounds::within(&bounds::SPEED, speed) {
        return Err(ValidationError::Speed(speed));
    }
    if !bounds::within(&bounds::DISTANCE, distance) {
        return Err(ValidationError::Distance(distance));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_readings_at_the_edges() {
        assert!(check_sensor_reading(&SensorReading::new(0.0, 0.0)).is_ok());
        assert!(check_sensor_reading(&SensorReading::new(100.0, 100_000.0)).is_ok());
    }

    #[test]
    fn rejects_readings_out_of_range() {
        assert_eq!(
            check_sensor_reading(&SensorReading::new(200.0, 50.0)),
            Err(ValidationError::Speed(200.0))
        );
        assert_eq!(
            check_sensor_reading(&SensorReading::new(10.0, -1.0)),
            Err(ValidationError::Distance(-1.0))
        );
    }

    #[test]
    fn first_violation_wins() {
        let point = TripPoint::new(-5.0, 200_000.0, 91.0, 181.0);
        assert_eq!(check_trip_point(&point), Err(ValidationError::Speed(-5.0)));

        let point = TripPoint::new(5.0, 10.0, 91.0, 181.0);
        assert_eq!(check_trip_point(&point), Err(ValidationError::Latitude(91.0)));
    }

    #[test]
    fn each_trip_bound_is_checked() {
        let valid = TripPoint::new(8.5, 150.3, 36.5, 138.5);
        assert!(check_trip_point(&valid).is_ok());

        let cases = [
            (TripPoint { speed: 100.5, ..valid }, ValidationError::Speed(100.5)),
            (
                TripPoint {
                    distance: 100_001.0,
                    ..valid
                },
                ValidationError::Distance(100_001.0),
            ),
            (
                TripPoint {
                    latitude: -90.5,
                    ..valid
                },
                ValidationError::Latitude(-90.5),
            ),
            (
                TripPoint {
                    longitude: 180.5,
                    ..valid
                },
                ValidationError::Longitude(180.5),
            ),
        ];
        for (point, expected) in cases {
            assert_eq!(check_trip_point(&point), Err(expected));
        }
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            check_sensor_reading(&SensorReading::new(f64::NAN, 1.0)),
            Err(ValidationError::Speed(_))
        ));
    }
}
