//! Paired-endpoint simulation.
//!
//! Runs a companion host and a simulated wearable in one process, connected
//! by an in-memory link: the host commands sensing, the wearable
//! acknowledges, streams or batches readings per the requested mode, and
//! acknowledges the stop.
//!
//! Run it:
//!   cargo run -p sensewire-demo-pairing -- --mode streaming --rounds 3

mod wearable;

use anyhow::Context;
use sensewire_core::{
    Message, SensingConfiguration, SensorType, StartSensing, StopSensing, TransmissionMode,
};
use sensewire_link::pair;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pairing=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let rounds = parse_arg(&args, "--rounds").unwrap_or(3);
    let mode = match parse_arg_string(&args, "--mode").as_deref() {
        Some(s) => s.parse().context("--mode must be `streaming` or `batch`")?,
        None => TransmissionMode::default(),
    };

    let (host_end, wearable_end) = pair();
    let wearable = tokio::spawn(wearable::run(wearable_end, rounds));

    let configuration =
        SensingConfiguration::new([SensorType::HeartRate, SensorType::Accelerometer])
            .context("building sensing configuration")?;
    run_host(host_end, configuration, mode).await?;

    wearable.await??;
    Ok(())
}

async fn run_host(
    mut link: sensewire_link::LinkEndpoint,
    configuration: SensingConfiguration,
    mode: TransmissionMode,
) -> anyhow::Result<()> {
    tracing::info!(%mode, sensors = configuration.sensors().len(), "requesting sensing");
    link.send(&StartSensing::with_mode(configuration, mode).into())?;

    let mut readings_seen = 0usize;
    while let Some(result) = link.recv().await {
        match result {
            Ok(Message::StartedSensing(m)) => {
                tracing::info!(start = %m.start_time(), "wearable started sensing");
                link.send(&StopSensing::new().into())?;
            }
            Ok(Message::SensingData(m)) => {
                readings_seen += m.readings().len();
                for reading in m.readings() {
                    tracing::info!(sensor = %reading.sensor, values = ?reading.values, at = %reading.captured_at, "reading");
                }
            }
            Ok(Message::StoppedSensing(m)) => {
                tracing::info!(stop = %m.stop_time(), readings_seen, "wearable stopped sensing");
                break;
            }
            Ok(other) => tracing::warn!(kind = ?other.kind(), "unexpected message on host side"),
            Err(e) => tracing::warn!(error = %e, "dropping undecodable payload"),
        }
    }
    Ok(())
}

fn parse_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn parse_arg_string(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
