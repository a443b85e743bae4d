//! Settle phase: detect a body at rest on the floor and ease it into a
//! leveled resting pose.
//!
//! Settling re-poses the *undeformed* shape rigidly. Positions are rebuilt
//! every step from the original model-space vertices rotated by the current
//! blended orientation about the center captured on entry. The spring
//! integrator does not run while a body settles.

use tracing::debug;
use wobble_math::orientation::{angular_distance, estimate_orientation, leveled};
use wobble_math::{Quat, Vector3};

use crate::config::SettleConfig;
use crate::state::ParticleState;

/// Returns true when a dynamic body should start settling.
///
/// Both conditions must hold after the step's integration and collision:
/// total kinetic energy below `energy_threshold`, and the lowest particle at
/// or below `ground_threshold`.
pub fn should_settle(state: &ParticleState, config: &SettleConfig) -> bool {
    if state.particle_count() == 0 {
        return false;
    }
    let kinetic = state.kinetic_energy();
    let min_y = state.min_y();
    kinetic < config.energy_threshold as f64 && min_y <= config.ground_threshold
}

/// Outcome of one settle step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleProgress {
    /// Angle (radians) still separating the current and target orientation.
    pub remaining_angle: f32,
    /// True once the remaining angle dropped below epsilon.
    pub finished: bool,
}

/// State captured when a body enters the settle phase.
#[derive(Debug, Clone)]
pub struct SettlePhase {
    /// Pivot of the rigid re-pose: particle centroid on entry.
    center: Vector3,
    /// Orientation estimated on entry.
    start: Quat,
    /// Orientation blended so far.
    current: Quat,
    /// Resting orientation: the start heading with zero pitch and roll.
    target: Quat,
    /// Original model-space positions (not the deformed ones).
    reference: Vec<Vector3>,
}

impl SettlePhase {
    /// Captures the settle state for `state`.
    ///
    /// `reference` are the pre-simulation model-space positions, one per
    /// particle.
    pub fn begin(state: &ParticleState, reference: &[Vector3]) -> Self {
        let center = state.center();
        let start = estimate_orientation(&state.positions, center);
        let target = leveled(start);

        let phase = Self {
            center,
            start,
            current: start,
            target,
            reference: reference.to_vec(),
        };
        debug!(
            center = ?phase.center.to_array(),
            remaining = phase.remaining_angle(),
            "settle phase captured"
        );
        phase
    }

    /// Pivot point of the re-pose.
    pub fn center(&self) -> Vector3 {
        self.center
    }

    /// Orientation estimated on entry.
    pub fn start(&self) -> Quat {
        self.start
    }

    /// Orientation reached so far.
    pub fn current(&self) -> Quat {
        self.current
    }

    /// Resting orientation.
    pub fn target(&self) -> Quat {
        self.target
    }

    /// Angle (radians) between the current and target orientation.
    pub fn remaining_angle(&self) -> f32 {
        angular_distance(self.current, self.target)
    }

    /// Blends one step toward the target and re-poses every particle.
    ///
    /// The blend fraction is `min(speed * dt, 1)`. When the remaining angle
    /// falls below `angular_epsilon` the pose snaps to the target and the
    /// phase reports `finished`. Velocities are held at zero throughout.
    pub fn advance(
        &mut self,
        state: &mut ParticleState,
        dt: f32,
        config: &SettleConfig,
    ) -> SettleProgress {
        let fraction = (config.speed * dt).clamp(0.0, 1.0);
        self.current = self.current.slerp(self.target, fraction).normalize();

        let mut remaining = self.remaining_angle();
        let finished = remaining < config.angular_epsilon;
        if finished {
            self.current = self.target;
            remaining = 0.0;
        }

        self.pose(state);
        state.zero_velocities();

        SettleProgress {
            remaining_angle: remaining,
            finished,
        }
    }

    /// Writes `center + rotate(reference, current)` into every particle.
    pub fn pose(&self, state: &mut ParticleState) {
        for (position, reference) in state.positions.iter_mut().zip(&self.reference) {
            *position = self.center + reference.rotated(self.current);
        }
    }
}
