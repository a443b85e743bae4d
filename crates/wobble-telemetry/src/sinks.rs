//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them (collect in memory,
//! forward to `tracing`, ...).

use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::events::SimulationEvent;

/// Trait for event consumers.
///
/// Implement this to create custom telemetry outputs.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Events collected by a [`VecSink`], shared with whoever holds a handle.
pub type SharedEvents = Arc<Mutex<Vec<SimulationEvent>>>;

/// Collects events in memory for tests and inspection.
///
/// The sink is boxed into the bus, so keep a [`shared`](VecSink::shared) handle
/// before registering it to read the events afterwards.
#[derive(Debug, Default)]
pub struct VecSink {
    events: SharedEvents,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the collected events.
    pub fn shared(&self) -> SharedEvents {
        Arc::clone(&self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that logs events using the `tracing` crate.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// The level events are logged at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let step = event.step;
        let kind = event.kind_name();
        if self.level == Level::ERROR {
            tracing::error!(step, kind, event = ?event.kind, "simulation_event");
        } else if self.level == Level::WARN {
            tracing::warn!(step, kind, event = ?event.kind, "simulation_event");
        } else if self.level == Level::INFO {
            tracing::info!(step, kind, event = ?event.kind, "simulation_event");
        } else if self.level == Level::DEBUG {
            tracing::debug!(step, kind, event = ?event.kind, "simulation_event");
        } else {
            tracing::trace!(step, kind, event = ?event.kind, "simulation_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
