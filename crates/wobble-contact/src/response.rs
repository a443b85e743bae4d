//! Collider trait and contact reporting.
//!
//! Colliders correct particle positions and velocities directly; there is
//! no separate detection pass for a fixed analytic boundary.

use serde::{Deserialize, Serialize};
use wobble_solver::ParticleState;

/// Result of one collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactResult {
    /// Number of particles that touched or crossed the boundary.
    pub resolved_count: u32,
    /// Largest distance a particle was pushed back inside.
    pub max_penetration: f32,
}

impl ContactResult {
    /// Returns true if no particle was corrected.
    pub fn is_empty(&self) -> bool {
        self.resolved_count == 0
    }
}

/// Trait for boundary collision strategies.
///
/// # Implementations
/// - [`BoxCollider`](crate::box_collider::BoxCollider): origin-centered cube with restitution
/// - [`NullCollider`]: unbounded space
pub trait Collider: Send {
    /// Pushes escaped particles back inside and adjusts their velocities.
    fn resolve(&self, state: &mut ParticleState) -> ContactResult;

    /// Clamps positions only, leaving velocities untouched.
    ///
    /// Used for poses that are written directly rather than integrated.
    fn contain_positions(&self, state: &mut ParticleState) -> ContactResult;

    /// Returns the collider name.
    fn name(&self) -> &str;
}

/// Collider for unbounded scenarios.
pub struct NullCollider;

impl Collider for NullCollider {
    fn resolve(&self, _state: &mut ParticleState) -> ContactResult {
        ContactResult::default()
    }

    fn contain_positions(&self, _state: &mut ParticleState) -> ContactResult {
        ContactResult::default()
    }

    fn name(&self) -> &str {
        "null_collider"
    }
}
