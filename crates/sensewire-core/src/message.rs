//! Protocol messages exchanged between a wearable and its companion host.
//!
//! Each variant owns its fields and knows how to flatten itself into a
//! [`Payload`] and rebuild itself from one. The kind tag is an associated
//! const of the variant type, so an instance can never report a kind that
//! disagrees with its codec.
//!
//! Wire keys and kind tags are the compatibility surface; changing either is
//! a breaking protocol change.

use crate::error::DecodeError;
use crate::payload::{Payload, Value};
use crate::sensing::{SensingConfiguration, SensorReading, SensorType, TransmissionMode};
use time::OffsetDateTime;

/// Reserved key holding the message kind tag.
pub const KIND_KEY: &str = "type";
/// Reserved key holding the creation timestamp.
pub const TIMESTAMP_KEY: &str = "ts";

const CONFIG_KEY: &str = "config";
const TRANSMISSION_KEY: &str = "transmission";
const DATA_KEY: &str = "data";
const START_TIME_KEY: &str = "startTime";
const STOP_TIME_KEY: &str = "endTime";

/// Discriminator for the closed message set.
///
/// `Unknown` is the forward-compatibility sentinel for tags this build does
/// not recognize; it is never encoded and never decodes into a usable
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum MessageKind {
    StartSensing = 0,
    StopSensing = 1,
    SensingData = 2,
    StartedSensing = 3,
    StoppedSensing = 4,
    Unknown = 5,
}

impl MessageKind {
    /// Wire tag for this kind.
    pub const fn tag(self) -> i64 {
        self as i64
    }

    /// Map a wire tag to a kind; anything unrecognized is `Unknown`.
    pub fn from_tag(tag: i64) -> Self {
        match tag {
            0 => MessageKind::StartSensing,
            1 => MessageKind::StopSensing,
            2 => MessageKind::SensingData,
            3 => MessageKind::StartedSensing,
            4 => MessageKind::StoppedSensing,
            _ => MessageKind::Unknown,
        }
    }
}

/// The two reserved entries every encoded message starts from.
fn base_payload(kind: MessageKind, timestamp: OffsetDateTime) -> Payload {
    let mut payload = Payload::new();
    payload.insert(KIND_KEY, Value::Int(kind.tag()));
    payload.insert(TIMESTAMP_KEY, Value::Timestamp(timestamp));
    payload
}

/// Command: start sensing with the given configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StartSensing {
    timestamp: OffsetDateTime,
    configuration: SensingConfiguration,
    mode: TransmissionMode,
}

impl StartSensing {
    pub const KIND: MessageKind = MessageKind::StartSensing;

    /// Create with the default (batch) transmission mode.
    pub fn new(configuration: SensingConfiguration) -> Self {
        Self::with_mode(configuration, TransmissionMode::default())
    }

    pub fn with_mode(configuration: SensingConfiguration, mode: TransmissionMode) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            configuration,
            mode,
        }
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn configuration(&self) -> &SensingConfiguration {
        &self.configuration
    }

    pub fn mode(&self) -> TransmissionMode {
        self.mode
    }

    pub fn encode(&self) -> Payload {
        let mut payload = base_payload(Self::KIND, self.timestamp);
        let tags = self
            .configuration
            .sensors()
            .iter()
            .map(|s| s.tag())
            .collect();
        payload.insert(CONFIG_KEY, Value::IntList(tags));
        payload.insert(TRANSMISSION_KEY, Value::Str(self.mode.as_str().to_string()));
        payload
    }

    pub fn decode(payload: &Payload) -> Result<Self, DecodeError> {
        let timestamp = payload.timestamp(TIMESTAMP_KEY)?;
        let mut sensors = Vec::new();
        for &tag in payload.int_list(CONFIG_KEY)? {
            sensors.push(SensorType::from_tag(tag).ok_or(DecodeError::UnknownSensor(tag))?);
        }
        let configuration = SensingConfiguration::new(sensors)?;
        let mode = payload
            .str(TRANSMISSION_KEY)?
            .parse::<TransmissionMode>()
            .map_err(|e| DecodeError::UnknownTransmissionMode(e.0))?;
        Ok(Self {
            timestamp,
            configuration,
            mode,
        })
    }
}

/// Command: stop sensing. Carries only the shared fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StopSensing {
    timestamp: OffsetDateTime,
}

impl StopSensing {
    pub const KIND: MessageKind = MessageKind::StopSensing;

    pub fn new() -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn encode(&self) -> Payload {
        base_payload(Self::KIND, self.timestamp)
    }

    pub fn decode(payload: &Payload) -> Result<Self, DecodeError> {
        let timestamp = payload.timestamp(TIMESTAMP_KEY)?;
        Ok(Self { timestamp })
    }
}

impl Default for StopSensing {
    fn default() -> Self {
        Self::new()
    }
}

/// Data: an ordered run of captured readings.
#[derive(Debug, Clone, PartialEq)]
pub struct SensingData {
    timestamp: OffsetDateTime,
    readings: Vec<SensorReading>,
}

impl SensingData {
    pub const KIND: MessageKind = MessageKind::SensingData;

    pub fn new(readings: Vec<SensorReading>) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            readings,
        }
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Readings in capture order.
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    pub fn encode(&self) -> Payload {
        let mut payload = base_payload(Self::KIND, self.timestamp);
        payload.insert(DATA_KEY, Value::Readings(self.readings.clone()));
        payload
    }

    pub fn decode(payload: &Payload) -> Result<Self, DecodeError> {
        let timestamp = payload.timestamp(TIMESTAMP_KEY)?;
        let readings = payload.readings(DATA_KEY)?.to_vec();
        Ok(Self {
            timestamp,
            readings,
        })
    }
}

/// Acknowledgement: sensing actually began at `start_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedSensing {
    timestamp: OffsetDateTime,
    start_time: OffsetDateTime,
}

impl StartedSensing {
    pub const KIND: MessageKind = MessageKind::StartedSensing;

    pub fn new(start_time: OffsetDateTime) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            start_time,
        }
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn start_time(&self) -> OffsetDateTime {
        self.start_time
    }

    pub fn encode(&self) -> Payload {
        let mut payload = base_payload(Self::KIND, self.timestamp);
        payload.insert(START_TIME_KEY, Value::Timestamp(self.start_time));
        payload
    }

    pub fn decode(payload: &Payload) -> Result<Self, DecodeError> {
        let timestamp = payload.timestamp(TIMESTAMP_KEY)?;
        let start_time = payload.timestamp(START_TIME_KEY)?;
        Ok(Self {
            timestamp,
            start_time,
        })
    }
}

/// Acknowledgement: sensing actually ended at `stop_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoppedSensing {
    timestamp: OffsetDateTime,
    stop_time: OffsetDateTime,
}

impl StoppedSensing {
    pub const KIND: MessageKind = MessageKind::StoppedSensing;

    pub fn new(stop_time: OffsetDateTime) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            stop_time,
        }
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn stop_time(&self) -> OffsetDateTime {
        self.stop_time
    }

    pub fn encode(&self) -> Payload {
        let mut payload = base_payload(Self::KIND, self.timestamp);
        payload.insert(STOP_TIME_KEY, Value::Timestamp(self.stop_time));
        payload
    }

    pub fn decode(payload: &Payload) -> Result<Self, DecodeError> {
        let timestamp = payload.timestamp(TIMESTAMP_KEY)?;
        let stop_time = payload.timestamp(STOP_TIME_KEY)?;
        Ok(Self {
            timestamp,
            stop_time,
        })
    }
}

/// Any message of the closed set, as returned by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    StartSensing(StartSensing),
    StopSensing(StopSensing),
    SensingData(SensingData),
    StartedSensing(StartedSensing),
    StoppedSensing(StoppedSensing),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::StartSensing(_) => StartSensing::KIND,
            Message::StopSensing(_) => StopSensing::KIND,
            Message::SensingData(_) => SensingData::KIND,
            Message::StartedSensing(_) => StartedSensing::KIND,
            Message::StoppedSensing(_) => StoppedSensing::KIND,
        }
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        match self {
            Message::StartSensing(m) => m.timestamp(),
            Message::StopSensing(m) => m.timestamp(),
            Message::SensingData(m) => m.timestamp(),
            Message::StartedSensing(m) => m.timestamp(),
            Message::StoppedSensing(m) => m.timestamp(),
        }
    }

    pub fn encode(&self) -> Payload {
        match self {
            Message::StartSensing(m) => m.encode(),
            Message::StopSensing(m) => m.encode(),
            Message::SensingData(m) => m.encode(),
            Message::StartedSensing(m) => m.encode(),
            Message::StoppedSensing(m) => m.encode(),
        }
    }
}

impl From<StartSensing> for Message {
    fn from(m: StartSensing) -> Self {
        Message::StartSensing(m)
    }
}

impl From<StopSensing> for Message {
    fn from(m: StopSensing) -> Self {
        Message::StopSensing(m)
    }
}

impl From<SensingData> for Message {
    fn from(m: SensingData) -> Self {
        Message::SensingData(m)
    }
}

impl From<StartedSensing> for Message {
    fn from(m: StartedSensing) -> Self {
        Message::StartedSensing(m)
    }
}

impl From<StoppedSensing> for Message {
    fn from(m: StoppedSensing) -> Self {
        Message::StoppedSensing(m)
    }
}
