//! In-process link between two paired endpoints.
//!
//! The real product carries payloads over a device-pairing transport; this
//! link gives tests and demos the same seam without hardware. Messages are
//! encoded on send and parsed on receive, so everything crossing the link is
//! a plain [`Payload`].

use sensewire_core::{DecodeError, Message, Payload, parse};
use tokio::sync::mpsc;

/// Failure moving a payload across the link.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("peer endpoint disconnected")]
    Disconnected,
}

/// One end of a paired link.
pub struct LinkEndpoint {
    tx: mpsc::UnboundedSender<Payload>,
    rx: mpsc::UnboundedReceiver<Payload>,
}

/// Create two connected endpoints.
pub fn pair() -> (LinkEndpoint, LinkEndpoint) {
    let (a_tx, b_rx) = mpsc::unbounded_channel();
    let (b_tx, a_rx) = mpsc::unbounded_channel();
    (
        LinkEndpoint { tx: a_tx, rx: a_rx },
        LinkEndpoint { tx: b_tx, rx: b_rx },
    )
}

impl LinkEndpoint {
    /// Encode and forward a message to the peer.
    pub fn send(&self, message: &Message) -> Result<(), LinkError> {
        tracing::debug!(kind = ?message.kind(), "sending");
        self.send_payload(message.encode())
    }

    /// Forward an already-encoded payload to the peer.
    pub fn send_payload(&self, payload: Payload) -> Result<(), LinkError> {
        self.tx.send(payload).map_err(|_| LinkError::Disconnected)
    }

    /// Await the next payload from the peer and parse it.
    ///
    /// `None` means the peer hung up. A delivered payload that fails to
    /// parse is reported, not dropped; the caller decides how to handle it.
    pub async fn recv(&mut self) -> Option<Result<Message, DecodeError>> {
        let payload = self.rx.recv().await?;
        let result = parse(&payload);
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "received undecodable payload");
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensewire_core::{MessageKind, Payload, StopSensing, Value};

    #[tokio::test]
    async fn message_crosses_the_link() {
        let (host, mut watch) = pair();
        host.send(&StopSensing::new().into()).unwrap();

        let received = watch.recv().await.unwrap().unwrap();
        assert_eq!(received.kind(), MessageKind::StopSensing);
    }

    #[tokio::test]
    async fn undecodable_payload_is_reported() {
        let (host, mut watch) = pair();
        let mut payload = Payload::new();
        payload.insert("type", Value::Int(42));
        host.send_payload(payload).unwrap();

        let result = watch.recv().await.unwrap();
        assert_eq!(result, Err(DecodeError::UnknownKind(42)));
    }

    #[tokio::test]
    async fn hangup_is_visible_on_both_paths() {
        let (host, watch) = pair();
        drop(watch);
        assert_eq!(
            host.send(&StopSensing::new().into()),
            Err(LinkError::Disconnected)
        );

        let (host, mut watch) = pair();
        drop(host);
        assert!(watch.recv().await.is_none());
    }
}
