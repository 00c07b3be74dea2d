//! Dispatch-by-tag reconstruction of received payloads.

use crate::error::DecodeError;
use crate::message::{
    KIND_KEY, Message, MessageKind, SensingData, StartSensing, StartedSensing, StopSensing,
    StoppedSensing,
};
use crate::payload::{Payload, Value};

/// Rebuild the typed message a payload represents.
///
/// The discriminator is read first; a payload without a recognizable tag is
/// rejected before any variant decode is attempted. A recognized tag
/// dispatches to exactly one decoder, whose failure propagates unchanged.
pub fn parse(payload: &Payload) -> Result<Message, DecodeError> {
    let tag = match payload.get(KIND_KEY) {
        Some(Value::Int(tag)) => *tag,
        _ => return Err(DecodeError::MissingKind),
    };
    match MessageKind::from_tag(tag) {
        MessageKind::StartSensing => StartSensing::decode(payload).map(Message::from),
        MessageKind::StopSensing => StopSensing::decode(payload).map(Message::from),
        MessageKind::SensingData => SensingData::decode(payload).map(Message::from),
        MessageKind::StartedSensing => StartedSensing::decode(payload).map(Message::from),
        MessageKind::StoppedSensing => StoppedSensing::decode(payload).map(Message::from),
        MessageKind::Unknown => Err(DecodeError::UnknownKind(tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensing::{SensingConfiguration, SensorReading, SensorType};
    use time::macros::datetime;

    fn sample_messages() -> Vec<Message> {
        let config = SensingConfiguration::new([SensorType::HeartRate]).unwrap();
        vec![
            StartSensing::new(config).into(),
            StopSensing::new().into(),
            SensingData::new(vec![SensorReading::new(
                SensorType::HeartRate,
                vec![68.0],
                datetime!(2024-05-01 12:00:01 UTC),
            )])
            .into(),
            StartedSensing::new(datetime!(2024-05-01 12:00 UTC)).into(),
            StoppedSensing::new(datetime!(2024-05-01 12:30 UTC)).into(),
        ]
    }

    #[test]
    fn parse_preserves_kind_and_content() {
        for msg in sample_messages() {
            let parsed = parse(&msg.encode()).unwrap();
            assert_eq!(parsed.kind(), msg.kind());
            assert_eq!(parsed, msg);
        }
    }

    #[test]
    fn missing_tag_is_rejected() {
        let mut payload = StopSensing::new().encode();
        payload.remove("type");
        assert_eq!(parse(&payload), Err(DecodeError::MissingKind));
    }

    #[test]
    fn non_integer_tag_is_rejected() {
        let mut payload = StopSensing::new().encode();
        payload.insert("type", Value::Str("stop_sensing".into()));
        assert_eq!(parse(&payload), Err(DecodeError::MissingKind));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut payload = StopSensing::new().encode();
        payload.insert("type", Value::Int(42));
        assert_eq!(parse(&payload), Err(DecodeError::UnknownKind(42)));
    }

    #[test]
    fn variant_failure_propagates() {
        let config = SensingConfiguration::new([SensorType::Gyroscope]).unwrap();
        let mut payload = StartSensing::new(config).encode();
        payload.remove("config");
        assert_eq!(parse(&payload), Err(DecodeError::MissingField("config")));
    }
}
