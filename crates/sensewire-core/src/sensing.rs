//! Sensor vocabulary shared by both endpoints.
//!
//! Wire tags here are part of the compatibility contract: renumbering a sensor
//! or a transmission-mode literal is a breaking protocol change.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// A sensor a wearable endpoint may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Accelerometer,
    DeviceMotion,
    Magnetometer,
    Gyroscope,
    HeartRate,
}

impl SensorType {
    /// Stable integer identity used on the wire.
    pub const fn tag(self) -> i64 {
        match self {
            SensorType::Accelerometer => 0,
            SensorType::DeviceMotion => 1,
            SensorType::Magnetometer => 2,
            SensorType::Gyroscope => 3,
            SensorType::HeartRate => 4,
        }
    }

    /// Map a wire tag back to a sensor, if known.
    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            0 => Some(SensorType::Accelerometer),
            1 => Some(SensorType::DeviceMotion),
            2 => Some(SensorType::Magnetometer),
            3 => Some(SensorType::Gyroscope),
            4 => Some(SensorType::HeartRate),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SensorType::Accelerometer => "accelerometer",
            SensorType::DeviceMotion => "device_motion",
            SensorType::Magnetometer => "magnetometer",
            SensorType::Gyroscope => "gyroscope",
            SensorType::HeartRate => "heart_rate",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One captured reading, already tagged by the sensing pipeline.
///
/// `values` holds one entry per axis (e.g. x/y/z for the accelerometer,
/// a single value for heart rate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor: SensorType,
    pub values: Vec<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub captured_at: OffsetDateTime,
}

impl SensorReading {
    pub fn new(sensor: SensorType, values: Vec<f64>, captured_at: OffsetDateTime) -> Self {
        Self {
            sensor,
            values,
            captured_at,
        }
    }
}

/// The set of sensors a StartSensing command enables.
///
/// Order is enablement order and survives a round trip exactly. The set is
/// never empty; repeats keep their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensingConfiguration {
    sensors: Vec<SensorType>,
}

impl SensingConfiguration {
    pub fn new(sensors: impl IntoIterator<Item = SensorType>) -> Result<Self, ConfigError> {
        let mut unique = Vec::new();
        for sensor in sensors {
            if !unique.contains(&sensor) {
                unique.push(sensor);
            }
        }
        if unique.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(Self { sensors: unique })
    }

    /// Enabled sensors, in enablement order.
    pub fn sensors(&self) -> &[SensorType] {
        &self.sensors
    }

    pub fn is_enabled(&self, sensor: SensorType) -> bool {
        self.sensors.contains(&sensor)
    }
}

/// Whether sensing data is streamed as captured or accumulated and sent in
/// batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransmissionMode {
    Streaming,
    #[default]
    Batch,
}

impl TransmissionMode {
    /// The wire literal for this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            TransmissionMode::Streaming => "streaming",
            TransmissionMode::Batch => "batch",
        }
    }
}

impl fmt::Display for TransmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransmissionMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "streaming" => Ok(TransmissionMode::Streaming),
            "batch" => Ok(TransmissionMode::Batch),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

/// A transmission-mode string outside the two wire literals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized transmission mode `{0}`")]
pub struct UnknownModeError(pub String);
