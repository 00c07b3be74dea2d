//! Decode failures.
//!
//! Decoding is all-or-nothing: any of these aborts reconstruction of the whole
//! message. Encoding cannot fail; invalid states are rejected at construction.

/// Error reconstructing a message from a received payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The discriminator entry is absent or not an integer.
    #[error("payload does not declare a message type")]
    MissingKind,
    /// The discriminator integer maps to no known message kind.
    #[error("unrecognized message type tag {0}")]
    UnknownKind(i64),
    /// A required key is not present in the payload.
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    /// A key is present but holds the wrong kind of value.
    #[error("field `{key}` is not {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
    /// A sensor tag in the configuration list maps to no known sensor.
    #[error("unrecognized sensor tag {0}")]
    UnknownSensor(i64),
    /// The transmission mode string is neither `batch` nor `streaming`.
    #[error("unrecognized transmission mode `{0}`")]
    UnknownTransmissionMode(String),
    /// The decoded configuration violates a construction invariant.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error constructing a sensing configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("sensing configuration requires at least one sensor")]
    Empty,
}
