//! # wobble-sim
//!
//! The simulation controller. Owns one soft body, its particle state and
//! the run/settle state machine, and drives everything one fixed step at a
//! time:
//!
//! ```text
//! Stopped --start--> Dynamic --(at rest on the floor)--> Settling --(leveled)--> Stopped
//! ```
//!
//! Pacing is external: the caller invokes [`Simulation::step`] once per
//! frame and reads back [`Simulation::buffers`] for display.
//!
//! ## Key Types
//!
//! - [`Simulation`]: Controller: load, reset, start/stop, step
//! - [`SoftBody`]: Immutable tier: mesh, topology, springs, rest pose
//! - [`SimulationMode`]: Run state, carrying the settle phase while settling
//! - [`StepOutcome`]: What one step did

pub mod body;
pub mod mode;
pub mod simulation;

pub use body::SoftBody;
pub use mode::{ModeKind, SimulationMode};
pub use simulation::{Simulation, StepOutcome};
