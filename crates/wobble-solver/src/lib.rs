//! # wobble-solver
//!
//! Time integration, spring topology, and the settle phase.
//!
//! ## Key Types
//!
//! - [`ParticleState`]: Per-particle positions and velocities (the mutable tier)
//! - [`SpringSet`]: One spring per unique mesh edge (immutable after build)
//! - [`Integrator`]: Pluggable time-integration trait
//! - [`SymplecticEuler`]: Gravity + spring + damping forces, semi-implicit Euler
//! - [`SettlePhase`]: Slerps a resting body into a leveled orientation
//! - [`SimulationConfig`]: Caller-settable physical parameters

pub mod config;
pub mod integrator;
pub mod settle;
pub mod springs;
pub mod state;
pub mod strategy;

pub use config::{SettleConfig, SimulationConfig};
pub use integrator::SymplecticEuler;
pub use settle::{SettlePhase, SettleProgress};
pub use springs::{Spring, SpringSet};
pub use state::ParticleState;
pub use strategy::{Integrator, StepResult};
