//! In-process transport and sensor-host seams for sensewire.
//!
//! The protocol core only ever sees [`Payload`](sensewire_core::Payload)
//! values; this crate supplies the collaborators around it: a paired
//! in-process link for moving payloads, and the trait a wearable endpoint
//! drives to reach its sensing hardware.

mod host;
mod link;

pub use host::{SensorHost, SimulatedHost, Unavailable};
pub use link::{LinkEndpoint, LinkError, pair};
