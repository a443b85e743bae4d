//! State snapshot serialization for replay and debugging.
//!
//! Snapshots capture the particle state at a point in time, enabling
//! deterministic replay and diff-based debugging.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wobble_math::Vector3;
use wobble_solver::ParticleState;
use wobble_types::{WobbleError, WobbleResult};

/// A complete particle state snapshot.
///
/// Serialized with `bincode` for compact binary output. Contains all data
/// needed to resume the simulation from this point; topology is not
/// included and must come from the same mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Step index when this snapshot was taken.
    pub step: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Controller mode name at capture time.
    pub mode: String,
    /// Shared particle mass.
    pub mass: f32,
    /// Particle positions (flat: [x0, y0, z0, x1, y1, z1, ...]).
    pub positions: Vec<f32>,
    /// Particle velocities (flat: [vx0, vy0, vz0, ...]).
    pub velocities: Vec<f32>,
    /// Number of particles.
    pub particle_count: usize,
}

impl StateSnapshot {
    /// Captures a snapshot of `state`.
    pub fn from_state(step: u64, sim_time: f64, mode: &str, state: &ParticleState) -> Self {
        Self {
            step,
            sim_time,
            mode: mode.to_string(),
            mass: state.mass,
            positions: state.flat_positions(),
            velocities: state.flat_velocities(),
            particle_count: state.particle_count(),
        }
    }

    /// Rebuilds the particle state.
    ///
    /// Fails if the buffers do not match `particle_count` or the mass is
    /// invalid.
    pub fn to_state(&self) -> WobbleResult<ParticleState> {
        let n = self.particle_count;
        if self.positions.len() != n * 3 || self.velocities.len() != n * 3 {
            return Err(WobbleError::Serialization(format!(
                "snapshot buffers do not match {n} particles ({} positions, {} velocities)",
                self.positions.len(),
                self.velocities.len()
            )));
        }
        let mut state = ParticleState::from_positions(unflatten(&self.positions), self.mass)?;
        state.velocities = unflatten(&self.velocities);
        Ok(state)
    }

    /// Largest absolute per-component position difference to `other`.
    ///
    /// Returns `None` if the snapshots have different particle counts.
    pub fn max_position_delta(&self, other: &Self) -> Option<f32> {
        if self.positions.len() != other.positions.len() {
            return None;
        }
        Some(
            self.positions
                .iter()
                .zip(&other.positions)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f32::max),
        )
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> WobbleResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| WobbleError::Serialization(format!("snapshot serialization failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> WobbleResult<Self> {
        bincode::deserialize(data).map_err(|e| {
            WobbleError::Serialization(format!("snapshot deserialization failed: {e}"))
        })
    }

    /// Writes the binary snapshot to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> WobbleResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Reads a binary snapshot from `path`.
    pub fn read_from(path: impl AsRef<Path>) -> WobbleResult<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}

fn unflatten(flat: &[f32]) -> Vec<Vector3> {
    flat.chunks_exact(3)
        .map(|c| Vector3::new(c[0], c[1], c[2]))
        .collect()
}
