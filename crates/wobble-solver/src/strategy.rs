//! Integrator trait: the seam for time-integration schemes.
//!
//! The controller calls an integrator once per dynamic step, then resolves
//! collisions itself:
//!
//! ```text
//! integrator.step(state, springs, config, dt)?;
//! collider.resolve(state);
//! ```

use wobble_types::WobbleResult;

use crate::config::SimulationConfig;
use crate::springs::SpringSet;
use crate::state::ParticleState;

/// Result of an integrator step.
#[derive(Debug, Clone, Default)]
pub struct StepResult {
    /// Number of springs evaluated.
    pub spring_count: usize,
    /// Largest per-particle net force magnitude this step.
    pub max_force: f32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for time integration schemes.
///
/// # Implementations
///
/// - [`SymplecticEuler`](crate::integrator::SymplecticEuler): semi-implicit Euler
pub trait Integrator: Send {
    /// Advance particle positions and velocities by one timestep.
    ///
    /// Modifies `state` in place. Collision handling is not part of this
    /// call.
    fn step(
        &mut self,
        state: &mut ParticleState,
        springs: &SpringSet,
        config: &SimulationConfig,
        dt: f32,
    ) -> WobbleResult<StepResult>;

    /// Returns the integrator's name.
    fn name(&self) -> &str;
}
