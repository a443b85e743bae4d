//! Semi-implicit (symplectic) Euler mass-spring integrator.
//!
//! One step:
//! 1. Every particle starts with force `g * m`.
//! 2. Each spring adds its elastic and damping force to `p0` and subtracts
//!    the identical vector from `p1`.
//! 3. `v += (f / m) * dt`, then `p += v * dt` using the updated velocity.
//!
//! The damper acts on the full relative velocity of the two particles, not
//! only its component along the spring, so it also resists relative motion
//! orthogonal to the spring.

use std::time::Instant;

use tracing::trace;
use wobble_math::Vector3;
use wobble_types::{WobbleError, WobbleResult};

use crate::config::SimulationConfig;
use crate::springs::SpringSet;
use crate::state::ParticleState;
use crate::strategy::{Integrator, StepResult};

/// Accumulate the net force on every particle into `forces`.
///
/// `forces` is resized to the particle count and overwritten. Each spring's
/// contribution is added to one endpoint and subtracted from the other, so
/// the forces a single spring produces always sum to exactly zero.
pub fn accumulate_forces(
    state: &ParticleState,
    springs: &SpringSet,
    config: &SimulationConfig,
    forces: &mut Vec<Vector3>,
) {
    let weight = Vector3::from(config.gravity) * state.mass;
    forces.clear();
    forces.resize(state.particle_count(), weight);

    let damping = config.damping * config.damping_scale;

    for spring in springs {
        let (i0, i1) = (spring.p0.index(), spring.p1.index());

        let delta = state.positions[i1] - state.positions[i0];
        // Zero-length springs get a zero direction and hence no elastic force.
        let direction = delta.normalized();
        let stretch = delta.length() - spring.rest_length;
        let mut force = direction * (config.stiffness * stretch);

        let relative_velocity = state.velocities[i1] - state.velocities[i0];
        force += relative_velocity * damping;

        forces[i0] += force;
        forces[i1] -= force;
    }
}

/// Semi-implicit Euler integrator.
///
/// Keeps its force buffer between steps to avoid reallocating.
#[derive(Debug, Default)]
pub struct SymplecticEuler {
    forces: Vec<Vector3>,
}

impl SymplecticEuler {
    /// Creates a new integrator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces accumulated during the most recent step.
    pub fn last_forces(&self) -> &[Vector3] {
        &self.forces
    }
}

impl Integrator for SymplecticEuler {
    fn step(
        &mut self,
        state: &mut ParticleState,
        springs: &SpringSet,
        config: &SimulationConfig,
        dt: f32,
    ) -> WobbleResult<StepResult> {
        let start = Instant::now();

        if !(dt.is_finite() && dt > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "timestep must be positive and finite, got {dt}"
            )));
        }
        if !(state.mass.is_finite() && state.mass > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "particle mass must be positive and finite, got {}",
                state.mass
            )));
        }

        accumulate_forces(state, springs, config, &mut self.forces);

        let inv_mass = 1.0 / state.mass;
        let mut max_force = 0.0f32;
        for ((force, velocity), position) in self
            .forces
            .iter()
            .zip(state.velocities.iter_mut())
            .zip(state.positions.iter_mut())
        {
            *velocity += *force * (inv_mass * dt);
            *position += *velocity * dt;
            max_force = max_force.max(force.length());
        }

        trace!(springs = springs.len(), max_force, "integrated step");

        Ok(StepResult {
            spring_count: springs.len(),
            max_force,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "symplectic_euler"
    }
}
