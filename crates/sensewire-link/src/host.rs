//! Sensor-access seam on the wearable side.
//!
//! The protocol core never touches hardware. A [`SensorHost`] is what the
//! wearable endpoint drives when a StartSensing command arrives: it must say
//! explicitly which sensors this device actually has, so a request for a
//! missing sensor is a reportable condition rather than a silent no-op.

use sensewire_core::{SensingConfiguration, SensorReading, SensorType};
use time::OffsetDateTime;

/// A requested sensor does not exist on this device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sensor {0} is not available on this device")]
pub struct Unavailable(pub SensorType);

/// Access to the local sensing hardware.
pub trait SensorHost {
    /// Whether this device can drive the given sensor at all.
    fn is_available(&self, sensor: SensorType) -> bool;

    /// Verify every sensor in the configuration exists on this device.
    fn check(&self, configuration: &SensingConfiguration) -> Result<(), Unavailable> {
        for &sensor in configuration.sensors() {
            if !self.is_available(sensor) {
                return Err(Unavailable(sensor));
            }
        }
        Ok(())
    }

    /// Begin capturing; returns the instant sensing actually started.
    fn start(&mut self, configuration: &SensingConfiguration) -> Result<OffsetDateTime, Unavailable>;

    /// Stop capturing; returns the stop instant, or `None` if sensing was
    /// not running.
    fn stop(&mut self) -> Option<OffsetDateTime>;

    /// Take the readings captured since the last drain, in capture order.
    fn drain(&mut self) -> Vec<SensorReading>;
}

/// A host with no real hardware behind it, for demos and tests.
///
/// Produces one canned reading per enabled sensor each time it is drained
/// while sensing.
pub struct SimulatedHost {
    available: Vec<SensorType>,
    active: Option<SensingConfiguration>,
}

impl SimulatedHost {
    pub fn new(available: impl IntoIterator<Item = SensorType>) -> Self {
        Self {
            available: available.into_iter().collect(),
            active: None,
        }
    }

    /// A host exposing every sensor the protocol knows.
    pub fn full() -> Self {
        Self::new([
            SensorType::Accelerometer,
            SensorType::DeviceMotion,
            SensorType::Magnetometer,
            SensorType::Gyroscope,
            SensorType::HeartRate,
        ])
    }

    fn canned_values(sensor: SensorType) -> Vec<f64> {
        match sensor {
            SensorType::Accelerometer => vec![0.0, 0.0, 9.81],
            SensorType::DeviceMotion => vec![0.0, 0.0, 0.0, 1.0],
            SensorType::Magnetometer => vec![22.0, 5.0, -43.0],
            SensorType::Gyroscope => vec![0.01, 0.0, -0.02],
            SensorType::HeartRate => vec![72.0],
        }
    }
}

impl SensorHost for SimulatedHost {
    fn is_available(&self, sensor: SensorType) -> bool {
        self.available.contains(&sensor)
    }

    fn start(&mut self, configuration: &SensingConfiguration) -> Result<OffsetDateTime, Unavailable> {
        self.check(configuration)?;
        self.active = Some(configuration.clone());
        Ok(OffsetDateTime::now_utc())
    }

    fn stop(&mut self) -> Option<OffsetDateTime> {
        self.active.take().map(|_| OffsetDateTime::now_utc())
    }

    fn drain(&mut self) -> Vec<SensorReading> {
        let Some(active) = &self.active else {
            return Vec::new();
        };
        let now = OffsetDateTime::now_utc();
        active
            .sensors()
            .iter()
            .map(|&sensor| SensorReading::new(sensor, Self::canned_values(sensor), now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sensor_is_an_explicit_error() {
        let mut host = SimulatedHost::new([SensorType::Accelerometer]);
        let config =
            SensingConfiguration::new([SensorType::Accelerometer, SensorType::HeartRate]).unwrap();
        assert_eq!(host.start(&config), Err(Unavailable(SensorType::HeartRate)));
        assert!(host.stop().is_none());
    }

    #[test]
    fn drain_follows_enablement_order() {
        let mut host = SimulatedHost::full();
        let config =
            SensingConfiguration::new([SensorType::HeartRate, SensorType::Gyroscope]).unwrap();
        host.start(&config).unwrap();

        let readings = host.drain();
        let sensors: Vec<_> = readings.iter().map(|r| r.sensor).collect();
        assert_eq!(sensors, [SensorType::HeartRate, SensorType::Gyroscope]);
    }

    #[test]
    fn drain_is_empty_when_not_sensing() {
        let mut host = SimulatedHost::full();
        assert!(host.drain().is_empty());
        host.start(&SensingConfiguration::new([SensorType::HeartRate]).unwrap())
            .unwrap();
        assert!(host.stop().is_some());
        assert!(host.drain().is_empty());
    }
}
