//! The simulated wearable endpoint.

use sensewire_core::{Message, SensingData, StartedSensing, StoppedSensing, TransmissionMode};
use sensewire_link::{LinkEndpoint, SensorHost, SimulatedHost};

/// Service the link until the host stops sensing or hangs up.
pub async fn run(mut link: LinkEndpoint, rounds: usize) -> anyhow::Result<()> {
    let mut hardware = SimulatedHost::full();
    let mut batched = Vec::new();

    while let Some(result) = link.recv().await {
        let message = match result {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring undecodable payload");
                continue;
            }
        };

        match message {
            Message::StartSensing(m) => {
                let start = match hardware.start(m.configuration()) {
                    Ok(start) => start,
                    Err(e) => {
                        tracing::warn!(error = %e, "cannot honor start command");
                        continue;
                    }
                };
                link.send(&StartedSensing::new(start).into())?;

                for _ in 0..rounds {
                    let readings = hardware.drain();
                    match m.mode() {
                        TransmissionMode::Streaming => {
                            link.send(&SensingData::new(readings).into())?;
                        }
                        TransmissionMode::Batch => batched.extend(readings),
                    }
                }
            }
            Message::StopSensing(_) => {
                if let Some(stop) = hardware.stop() {
                    if !batched.is_empty() {
                        link.send(&SensingData::new(std::mem::take(&mut batched)).into())?;
                    }
                    link.send(&StoppedSensing::new(stop).into())?;
                }
                break;
            }
            other => {
                tracing::warn!(kind = ?other.kind(), "unexpected message on wearable side");
            }
        }
    }
    Ok(())
}
