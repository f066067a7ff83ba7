//! Accepted value ranges for incoming telemetry. All ranges are inclusive.

use std::ops::RangeInclusive;

/// km/h
pub const SPEED: RangeInclusive<f64> = 0.0..=100.0;

/// meters
pub const DISTANCE: RangeInclusive<f64> = 0.0..=100_000.0;

/// degrees
pub const LATITUDE: RangeInclusive<f64> = -90.0..=90.0;

/// degrees
pub const LONGITUDE: RangeInclusive<f64> = -180.0..=180.0;

/// `RangeInclusive::contains` already refuses NaN, infinities fall outside
/// every finite range.
pub fn within(range: &RangeInclusive<f64>, value: f64) -> bool {
    range.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inclusive() {
        assert!(within(&SPEED, 0.0));
        assert!(within(&SPEED, 100.0));
        assert!(within(&DISTANCE, 100_000.0));
        assert!(within(&LATITUDE, -90.0));
        assert!(within(&LONGITUDE, 180.0));
    }

    #[test]
    fn outside_values_are_refused() {
        assert!(!within(&SPEED, -0.1));
        assert!(!within(&SPEED, 100.01));
        assert!(!within(&DISTANCE, 100_000.5));
        assert!(!within(&LATITUDE, 90.000001));
        assert!(!within(&LONGITUDE, -180.5));
    }

    #[test]
    fn non_finite_values_are_refused() {
        assert!(!within(&SPEED, f64::NAN));
        assert!(!within(&DISTANCE, f64::INFINITY));
        assert!(!within(&LONGITUDE, f64::NEG_INFINITY));
    }
}
