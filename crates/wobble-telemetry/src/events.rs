//! Simulation event types.
//!
//! Structured events emitted by the controller during each step. Events
//! are lightweight value types that carry just enough data to be useful
//! for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed) the event belongs to.
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Step started.
    StepBegin {
        /// Simulated time at the start of the step (seconds).
        sim_time: f64,
    },

    /// Step completed.
    StepEnd {
        /// Wall-clock time for the entire step (seconds).
        wall_time: f64,
    },

    /// Energy snapshot after the step.
    Energy {
        /// Total kinetic energy (Σ ½·m·|v|²).
        kinetic: f64,
    },

    /// Collision pass completed.
    Contacts {
        /// Particles pushed back inside the box.
        resolved_count: u32,
        /// Largest correction distance.
        max_penetration: f32,
    },

    /// The controller changed mode.
    ModeChange {
        /// Mode before the transition.
        from: String,
        /// Mode after the transition.
        to: String,
    },

    /// One settle step completed.
    SettleProgress {
        /// Remaining angle (radians) to the resting orientation.
        remaining_angle: f32,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }

    /// Short stable name of the event kind.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::Energy { .. } => "energy",
            EventKind::Contacts { .. } => "contacts",
            EventKind::ModeChange { .. } => "mode_change",
            EventKind::SettleProgress { .. } => "settle_progress",
            EventKind::Custom { .. } => "custom",
        }
    }
}
