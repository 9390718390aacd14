//! Lenient numeric decoding for request bodies.
//!
//! Browsers and form libraries frequently send numbers as strings, or
//! integer flags as `1.0` / `true`. These helpers accept any value that is
//! losslessly coercible to the declared type and reject everything else.
//! Use them with `#[serde(deserialize_with = "...")]`.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Decode an `f64` from a JSON number, a boolean, or a numeric string.
/// Non-finite values are rejected.
pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FloatVisitor)
}

/// Decode an `i64` from a JSON integer, an integral float, a boolean,
/// or an integer string.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntegerVisitor)
}

struct FloatVisitor;

impl<'de> Visitor<'de> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a finite number, a boolean, or a numeric string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<f64, E> {
        Ok(if v { 1.0 } else { 0.0 })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        if v.is_finite() {
            Ok(v)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(parsed),
            _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

struct IntegerVisitor;

impl<'de> Visitor<'de> for IntegerVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer, an integral float, a boolean, or an integer string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<i64, E> {
        Ok(i64::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        integral(v).ok_or_else(|| E::invalid_value(de::Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        let trimmed = v.trim();
        if let Ok(parsed) = trimmed.parse::<i64>() {
            return Ok(parsed);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(integral)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// `Some(v as i64)` when `v` has no fractional part and fits in an `i64`.
fn integral(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "super::float")]
        score: f64,
        #[serde(deserialize_with = "super::integer")]
        flag: i64,
    }

    fn parse(json: &str) -> Result<Probe, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_plain_numbers() {
        let p = parse(r#"{"score": 88.5, "flag": 1}"#).unwrap();
        assert_eq!(p.score, 88.5);
        assert_eq!(p.flag, 1);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let p = parse(r#"{"score": " 72 ", "flag": "0"}"#).unwrap();
        assert_eq!(p.score, 72.0);
        assert_eq!(p.flag, 0);
    }

    #[test]
    fn test_integral_float_and_bool_flags() {
        let p = parse(r#"{"score": 90, "flag": 1.0}"#).unwrap();
        assert_eq!(p.flag, 1);
        let p = parse(r#"{"score": 90, "flag": true}"#).unwrap();
        assert_eq!(p.flag, 1);
    }

    #[test]
    fn test_bool_score_is_coerced() {
        let p = parse(r#"{"score": true, "flag": 0}"#).unwrap();
        assert_eq!(p.score, 1.0);
        let p = parse(r#"{"score": false, "flag": 0}"#).unwrap();
        assert_eq!(p.score, 0.0);
    }

    #[test]
    fn test_fractional_flag_rejected() {
        assert!(parse(r#"{"score": 90, "flag": 1.5}"#).is_err());
        assert!(parse(r#"{"score": 90, "flag": "1.5"}"#).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse(r#"{"score": "ninety", "flag": 1}"#).is_err());
        assert!(parse(r#"{"score": null, "flag": 1}"#).is_err());
        assert!(parse(r#"{"score": "NaN", "flag": 1}"#).is_err());
        assert!(parse(r#"{"score": [1], "flag": 1}"#).is_err());
    }
}
