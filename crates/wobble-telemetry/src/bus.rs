//! Per-step event queue with pluggable sinks.
//!
//! The controller records events while a step runs and flushes them once
//! the step is done, so sinks always observe whole steps. Events recorded
//! while no sink listens are counted and dropped at once instead of queued.

use std::sync::mpsc;

use crate::events::{EventKind, SimulationEvent};
use crate::sinks::EventSink;

/// Telemetry bus owned by a simulation.
pub struct EventBus {
    queue_tx: mpsc::Sender<SimulationEvent>,
    queue_rx: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
    delivered: u64,
    dropped: u64,
}

impl EventBus {
    pub fn new() -> Self {
        let (queue_tx, queue_rx) = mpsc::channel();
        Self {
            queue_tx,
            queue_rx,
            sinks: Vec::new(),
            enabled: true,
            delivered: 0,
            dropped: 0,
        }
    }

    /// Attaches a sink. It sees events recorded from now on.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Turns recording on or off. Events recorded while off are dropped.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns true if a recorded event would reach at least one sink.
    pub fn has_sinks(&self) -> bool {
        self.enabled && !self.sinks.is_empty()
    }

    /// Queues an event for the next flush.
    pub fn emit(&mut self, event: SimulationEvent) {
        if !self.has_sinks() {
            self.dropped += 1;
            return;
        }
        // Both channel ends live in `self`.
        let _ = self.queue_tx.send(event);
    }

    /// Queues an event of `kind` stamped with `step`.
    pub fn record(&mut self, step: u64, kind: EventKind) {
        self.emit(SimulationEvent::new(step, kind));
    }

    /// Hands every queued event to each sink in attach order.
    ///
    /// Returns the number of events delivered.
    pub fn flush(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.queue_rx.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            count += 1;
        }
        self.delivered += count as u64;
        count
    }

    /// Flushes, then lets every sink finish its output.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Events delivered to sinks since creation.
    pub fn delivered_count(&self) -> u64 {
        self.delivered
    }

    /// Events dropped because the bus was off or had no sinks.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sinks: Vec<&str> = self.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("EventBus")
            .field("sinks", &sinks)
            .field("enabled", &self.enabled)
            .field("delivered", &self.delivered)
            .field("dropped", &self.dropped)
            .finish()
    }
}
