//! # wobble-telemetry
//!
//! Event bus for simulation telemetry. The controller emits structured
//! events (step timing, energy, contacts, mode changes, settle progress)
//! that pluggable sinks consume: an in-memory [`VecSink`] for tests and
//! tools, and a [`TracingSink`] that forwards to `tracing`.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
