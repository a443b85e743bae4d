//! Run state of the controller.

use std::fmt;

use serde::{Deserialize, Serialize};
use wobble_solver::SettlePhase;

/// What the controller does on the next step.
#[derive(Debug, Clone, Default)]
pub enum SimulationMode {
    /// Steps are no-ops.
    #[default]
    Stopped,
    /// Forces are integrated and collisions resolved.
    Dynamic,
    /// The undeformed shape is being rotated into its resting orientation.
    Settling(SettlePhase),
}

impl SimulationMode {
    /// The mode without its payload.
    pub fn kind(&self) -> ModeKind {
        match self {
            SimulationMode::Stopped => ModeKind::Stopped,
            SimulationMode::Dynamic => ModeKind::Dynamic,
            SimulationMode::Settling(_) => ModeKind::Settling,
        }
    }

    /// Returns true unless stopped.
    pub fn is_running(&self) -> bool {
        !matches!(self, SimulationMode::Stopped)
    }

    /// The settle phase, while settling.
    pub fn settle_phase(&self) -> Option<&SettlePhase> {
        match self {
            SimulationMode::Settling(phase) => Some(phase),
            _ => None,
        }
    }
}

/// Payload-free mode tag, used in reports and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Stopped,
    Dynamic,
    Settling,
}

impl ModeKind {
    /// Returns a stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ModeKind::Stopped => "stopped",
            ModeKind::Dynamic => "dynamic",
            ModeKind::Settling => "settling",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
