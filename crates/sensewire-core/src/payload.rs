//! Generic key/value payload carried between the paired endpoints.
//!
//! The transport only ever sees `Payload` values; every message variant
//! flattens itself into one and reconstructs itself from one. Values are a
//! closed union, so a key holding the wrong shape is a reportable decode
//! failure rather than a cast error.

use crate::error::DecodeError;
use crate::sensing::SensorReading;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// A dynamically-typed payload entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Str(String),
    Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
    Readings(Vec<SensorReading>),
    IntList(Vec<i64>),
}

impl Value {
    /// Human-readable shape name, used in decode errors.
    const fn shape(&self) -> &'static str {
        match self {
            Value::Int(_) => "an integer",
            Value::Str(_) => "a string",
            Value::Timestamp(_) => "a timestamp",
            Value::Readings(_) => "a reading list",
            Value::IntList(_) => "an integer list",
        }
    }
}

/// An order-irrelevant mapping from string keys to tagged values.
///
/// Keys are message-kind-specific; there is no global schema beyond the two
/// reserved entries every encoded message carries (discriminator and
/// timestamp).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    entries: BTreeMap<String, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn require(&self, key: &'static str) -> Result<&Value, DecodeError> {
        self.entries
            .get(key)
            .ok_or(DecodeError::MissingField(key))
    }

    fn wrong_type(key: &'static str, expected: &'static str) -> DecodeError {
        DecodeError::WrongType { key, expected }
    }

    /// Read `key` as an integer.
    pub fn int(&self, key: &'static str) -> Result<i64, DecodeError> {
        match self.require(key)? {
            Value::Int(v) => Ok(*v),
            _ => Err(Self::wrong_type(key, "an integer")),
        }
    }

    /// Read `key` as a string.
    pub fn str(&self, key: &'static str) -> Result<&str, DecodeError> {
        match self.require(key)? {
            Value::Str(v) => Ok(v),
            _ => Err(Self::wrong_type(key, "a string")),
        }
    }

    /// Read `key` as a point in time.
    pub fn timestamp(&self, key: &'static str) -> Result<OffsetDateTime, DecodeError> {
        match self.require(key)? {
            Value::Timestamp(v) => Ok(*v),
            _ => Err(Self::wrong_type(key, "a timestamp")),
        }
    }

    /// Read `key` as a list of sensor readings.
    pub fn readings(&self, key: &'static str) -> Result<&[SensorReading], DecodeError> {
        match self.require(key)? {
            Value::Readings(v) => Ok(v),
            _ => Err(Self::wrong_type(key, "a reading list")),
        }
    }

    /// Read `key` as a list of integers.
    pub fn int_list(&self, key: &'static str) -> Result<&[i64], DecodeError> {
        match self.require(key)? {
            Value::IntList(v) => Ok(v),
            _ => Err(Self::wrong_type(key, "an integer list")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensing::SensorType;
    use time::macros::datetime;

    #[test]
    fn typed_accessors() {
        let mut payload = Payload::new();
        payload.insert("count", Value::Int(7));
        payload.insert("mode", Value::Str("batch".into()));
        payload.insert("at", Value::Timestamp(datetime!(2024-05-01 12:00 UTC)));

        assert_eq!(payload.int("count"), Ok(7));
        assert_eq!(payload.str("mode"), Ok("batch"));
        assert_eq!(payload.timestamp("at"), Ok(datetime!(2024-05-01 12:00 UTC)));
    }

    #[test]
    fn missing_key_is_reported() {
        let payload = Payload::new();
        assert_eq!(payload.int("count"), Err(DecodeError::MissingField("count")));
    }

    #[test]
    fn wrong_shape_is_reported() {
        let mut payload = Payload::new();
        payload.insert("count", Value::Str("seven".into()));
        assert_eq!(
            payload.int("count"),
            Err(DecodeError::WrongType {
                key: "count",
                expected: "an integer"
            })
        );
    }

    #[test]
    fn json_round_trip() {
        let mut payload = Payload::new();
        payload.insert("config", Value::IntList(vec![0, 4]));
        payload.insert(
            "data",
            Value::Readings(vec![SensorReading::new(
                SensorType::HeartRate,
                vec![71.0],
                datetime!(2024-05-01 12:00:01 UTC),
            )]),
        );

        let json = serde_json::to_string(&payload).unwrap();
        let back: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
