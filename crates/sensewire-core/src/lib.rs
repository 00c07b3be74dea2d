//! Core message types for the sensewire pairing protocol.
//!
//! A wearable endpoint and its companion host exchange a small closed set of
//! messages: sensing commands travel one way, acknowledgements and captured
//! data travel back. Every message flattens into a generic [`Payload`] for
//! the transport collaborator and is rebuilt on the far side by
//! [`parse`]. This crate is pure data transformation; moving payloads
//! between devices belongs to the transport layered above it.

mod error;
mod message;
mod parser;
mod payload;
mod sensing;

pub use error::{ConfigError, DecodeError};
pub use message::{
    KIND_KEY, Message, MessageKind, SensingData, StartSensing, StartedSensing, StopSensing,
    StoppedSensing, TIMESTAMP_KEY,
};
pub use parser::parse;
pub use payload::{Payload, Value};
pub use sensing::{
    SensingConfiguration, SensorReading, SensorType, TransmissionMode, UnknownModeError,
};
