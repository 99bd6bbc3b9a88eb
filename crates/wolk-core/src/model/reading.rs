//! Feed readings.
//!
//! A reading keeps every value as a string and reinterprets it on demand.
//! The `is_*` predicates decide whether a given interpretation is valid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static UINT_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));
static INT_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("valid regex"));
static DOUBLE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?$").expect("valid regex")
});
static HEX_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]+$").expect("valid regex"));

/// How a single string value is best represented on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    UInt,
    Int,
    Double,
    String,
}

/// Classify a value, probing boolean, unsigned, signed and floating point in
/// that order before falling back to a plain string.
pub fn classify(value: &str) -> ValueKind {
    if is_boolean(value) {
        ValueKind::Boolean
    } else if is_uint(value) {
        ValueKind::UInt
    } else if is_int(value) {
        ValueKind::Int
    } else if is_double(value) {
        ValueKind::Double
    } else {
        ValueKind::String
    }
}

pub fn is_boolean(value: &str) -> bool {
    value == "true" || value == "false"
}

pub fn is_uint(value: &str) -> bool {
    UINT_FORMAT.is_match(value) && value.parse::<u64>().is_ok()
}

pub fn is_int(value: &str) -> bool {
    INT_FORMAT.is_match(value) && value.parse::<i64>().is_ok()
}

pub fn is_double(value: &str) -> bool {
    DOUBLE_FORMAT.is_match(value) && value.parse::<f64>().is_ok()
}

pub fn is_hex(value: &str) -> bool {
    HEX_FORMAT.is_match(value)
}

pub fn is_location(value: &str) -> bool {
    Location::parse(value).is_some()
}

/// A geographic position carried by a location feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse `"<latitude>,<longitude>"`.
    pub fn parse(value: &str) -> Option<Self> {
        let (latitude, longitude) = value.split_once(',')?;
        let (latitude, longitude) = (latitude.trim(), longitude.trim());
        if !is_double(latitude) || !is_double(longitude) {
            return None;
        }
        Some(Self::new(latitude.parse().ok()?, longitude.parse().ok()?))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Value(s) of one feed at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReadingFields")]
pub struct Reading {
    /// Reference of the feed the value belongs to.
    reference: String,
    /// Stored values, never empty.
    values: Vec<String>,
    /// Milliseconds since the Unix epoch.
    timestamp: u64,
}

// Deserialization goes through `with_values` so an empty value list is
// rejected.
#[derive(Deserialize)]
struct ReadingFields {
    reference: String,
    values: Vec<String>,
    timestamp: u64,
}

impl TryFrom<ReadingFields> for Reading {
    type Error = Error;

    fn try_from(fields: ReadingFields) -> Result<Self> {
        Self::with_values(fields.reference, fields.values, fields.timestamp)
    }
}

impl Reading {
    /// Create a single-value reading. Anything with a `Display` impl works:
    /// booleans, integers, floats, strings and [`Location`].
    pub fn new(reference: impl Into<String>, value: impl ToString, timestamp: u64) -> Self {
        Self {
            reference: reference.into(),
            values: vec![value.to_string()],
            timestamp,
        }
    }

    /// Create a single-value reading stamped with the current time.
    pub fn now(reference: impl Into<String>, value: impl ToString) -> Self {
        Self::new(reference, value, current_timestamp())
    }

    /// Create a reading from a list of values. At least one value is required.
    pub fn with_values<I, T>(reference: impl Into<String>, values: I, timestamp: u64) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let reference = reference.into();
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if values.is_empty() {
            return Err(Error::EmptyValues(reference));
        }

        Ok(Self {
            reference,
            values,
            timestamp,
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// First value as stored.
    pub fn string_value(&self) -> &str {
        self.values.first().map_or("", String::as_str)
    }

    pub fn string_values(&self) -> &[String] {
        &self.values
    }

    pub fn is_multi(&self) -> bool {
        self.values.len() > 1
    }

    pub fn is_boolean(&self) -> bool {
        is_boolean(self.string_value())
    }

    pub fn is_uint(&self) -> bool {
        is_uint(self.string_value())
    }

    pub fn is_int(&self) -> bool {
        is_int(self.string_value())
    }

    pub fn is_double(&self) -> bool {
        is_double(self.string_value())
    }

    pub fn is_hex(&self) -> bool {
        is_hex(self.string_value())
    }

    pub fn is_location(&self) -> bool {
        is_location(self.string_value())
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.string_value().parse().ok().filter(|_| self.is_boolean())
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.is_uint().then(|| self.string_value().parse().ok()).flatten()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.is_int().then(|| self.string_value().parse().ok()).flatten()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.is_double().then(|| self.string_value().parse().ok()).flatten()
    }

    /// Hex value decoded as an unsigned integer.
    pub fn as_hex(&self) -> Option<u64> {
        self.is_hex()
            .then(|| u64::from_str_radix(self.string_value(), 16).ok())
            .flatten()
    }

    pub fn as_location(&self) -> Option<Location> {
        Location::parse(self.string_value())
    }
}

fn current_timestamp() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("true"), ValueKind::Boolean);
        assert_eq!(classify("42"), ValueKind::UInt);
        assert_eq!(classify("-42"), ValueKind::Int);
        assert_eq!(classify("-4.2"), ValueKind::Double);
        assert_eq!(classify("1e3"), ValueKind::Double);
        assert_eq!(classify("TRUE"), ValueKind::String);
        assert_eq!(classify("12abc"), ValueKind::String);
        assert_eq!(classify(""), ValueKind::String);
    }

    #[test]
    fn test_typed_constructors() {
        assert_eq!(Reading::new("SW", true, 1).as_bool(), Some(true));
        assert_eq!(Reading::new("C", 17u64, 1).as_u64(), Some(17));
        assert_eq!(Reading::new("I", -5i64, 1).as_i64(), Some(-5));
        assert_eq!(Reading::new("T", 23.5, 1).as_f64(), Some(23.5));
        assert_eq!(Reading::new("S", "hello", 1).string_value(), "hello");
        assert_eq!(Reading::new("H", "ff", 1).as_hex(), Some(255));
    }

    #[test]
    fn test_location() {
        let reading = Reading::new("GPS", Location::new(45.25, 19.83), 1);
        assert!(reading.is_location());
        assert_eq!(reading.as_location(), Some(Location::new(45.25, 19.83)));
        assert!(!Reading::new("GPS", "45.2", 1).is_location());
    }

    #[test]
    fn test_multi_values() {
        let reading = Reading::with_values("ACL", [1.0, 2.5, 3.0], 10).unwrap();
        assert!(reading.is_multi());
        assert_eq!(reading.string_values(), &["1", "2.5", "3"]);

        let single = Reading::with_values("ACL", ["1"], 10).unwrap();
        assert!(!single.is_multi());
    }

    #[test]
    fn test_empty_values_rejected() {
        let result = Reading::with_values("ACL", Vec::<String>::new(), 10);
        assert_eq!(result, Err(Error::EmptyValues("ACL".to_string())));
    }

    #[test]
    fn test_deserialize_rejects_empty_values() {
        let result = serde_json::from_str::<Reading>(r#"{"reference":"T","values":[],"timestamp":1}"#);
        assert!(result.unwrap_err().to_string().contains("has no values"));

        let reading: Reading =
            serde_json::from_str(r#"{"reference":"T","values":["21.5"],"timestamp":1}"#).unwrap();
        assert_eq!(reading.as_f64(), Some(21.5));
    }

    #[test]
    fn test_mismatched_interpretation() {
        let reading = Reading::new("T", "warm", 1);
        assert_eq!(reading.as_f64(), None);
        assert_eq!(reading.as_bool(), None);
        assert_eq!(reading.as_u64(), None);
    }
}
