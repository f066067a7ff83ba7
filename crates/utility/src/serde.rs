use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Serializers writing floats as JSON numbers with a fixed count of fractional
/// digits, e.g. `36.500000` rather than `36.5`.
///
/// Only meaningful with `serde_json`, which passes the preformatted number
/// through untouched.
pub mod fixed_decimal {
    use ::serde::{ser::Error as _, Serialize as _, Serializer};
    use serde_json::value::RawValue;

    use super::round_half_up;

    pub fn one<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize(*value, 1, serializer)
    }

    pub fn six<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize(*value, 6, serializer)
    }

    fn serialize<S>(value: f64, precision: u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !value.is_finite() {
            return Err(S::Error::custom(format!(
                "can not write {} as a JSON number",
                value
            )));
        }
        let raw = RawValue::from_string(round_half_up(value, precision))
            .map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// Formats `value` with exactly `precision` fractional digits.
///
/// Rounds the shortest decimal form of `value` half away from zero, so `8.25`
/// becomes `8.3` and `150.35` becomes `150.4`, even though neither is exactly
/// representable as written.
pub fn round_half_up(value: f64, precision: u32) -> String {
    let magnitude = value.abs();
    // Far below the last digit there is nothing to round up, and from 1e15 on
    // an f64 carries no fraction. Plain formatting is exact in both ranges.
    if magnitude < 10f64.powi(-(precision as i32) - 2) || magnitude >= 1e15 {
        return format!("{:.*}", precision as usize, value);
    }

    let decimal = match Decimal::from_str(&magnitude.to_string()) {
        Ok(decimal) => decimal,
        Err(_) => return format!("{:.*}", precision as usize, value),
    };
    let mut rounded =
        decimal.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(precision);

    if value.is_sign_negative() {
        format!("-{}", rounded)
    } else {
        rounded.to_string()
    }
}

/// Renders `value` the way the dashboard reads sensor values: plain decimals
/// with at least one fractional digit (`100.0`) from `0.001` up to `1e7`,
/// scientific notation with an upper case `E` outside (`1.0E-4`).
pub fn plain_decimal(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && magnitude != 0.0 && !(1e-3..1e7).contains(&magnitude) {
        let text = format!("{:e}", value);
        if let Some((mantissa, exponent)) = text.split_once('e') {
            return format!("{}E{}", with_fraction(mantissa), exponent);
        }
        return text;
    }
    if value.is_finite() {
        with_fraction(&value.to_string())
    } else {
        value.to_string()
    }
}

fn with_fraction(number: &str) -> String {
    if number.contains('.') {
        number.to_owned()
    } else {
        format!("{}.0", number)
    }
}
