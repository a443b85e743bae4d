//! Analytic origin-centered cube collider.
//!
//! Each axis is handled independently and in x, y, z order. A coordinate
//! beyond `+half_extent` is clamped to it, one beyond `-half_extent` to its
//! negative, and in both cases the velocity component on that axis is
//! multiplied by `-restitution`. A particle past two faces at once (a corner)
//! gets both corrections in the same pass.

use tracing::trace;
use wobble_math::Vector3;
use wobble_solver::{ParticleState, SimulationConfig};

use crate::response::{Collider, ContactResult};

/// Closed cube `[-half_extent, half_extent]^3` with bouncy walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    /// Distance from the origin to every wall.
    pub half_extent: f32,
    /// Fraction of the normal velocity kept after a hit, in [0, 1].
    pub restitution: f32,
}

impl BoxCollider {
    /// Creates a new box collider.
    pub fn new(half_extent: f32, restitution: f32) -> Self {
        Self {
            half_extent,
            restitution,
        }
    }

    /// Creates the collider described by a simulation config.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.half_extent, config.restitution)
    }

    /// Returns true if `p` lies inside or on the cube.
    pub fn contains(&self, p: Vector3) -> bool {
        let b = self.half_extent;
        p.x.abs() <= b && p.y.abs() <= b && p.z.abs() <= b
    }

    /// Clamps one coordinate, returning the correction depth if it was out.
    #[inline]
    fn clamp_axis(&self, coord: &mut f32) -> Option<f32> {
        let b = self.half_extent;
        if *coord > b {
            let depth = *coord - b;
            *coord = b;
            Some(depth)
        } else if *coord < -b {
            let depth = -b - *coord;
            *coord = -b;
            Some(depth)
        } else {
            None
        }
    }

    fn pass(&self, state: &mut ParticleState, reflect: bool) -> ContactResult {
        let mut resolved = 0u32;
        let mut max_penetration = 0.0_f32;

        for (p, v) in state.positions.iter_mut().zip(state.velocities.iter_mut()) {
            let mut hit = false;
            for (coord, vel) in [(&mut p.x, &mut v.x), (&mut p.y, &mut v.y), (&mut p.z, &mut v.z)] {
                if let Some(depth) = self.clamp_axis(coord) {
                    if reflect {
                        *vel *= -self.restitution;
                    }
                    max_penetration = max_penetration.max(depth);
                    hit = true;
                }
            }
            if hit {
                resolved += 1;
            }
        }

        if resolved > 0 {
            trace!(resolved, max_penetration, "box contacts resolved");
        }

        ContactResult {
            resolved_count: resolved,
            max_penetration,
        }
    }
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl Collider for BoxCollider {
    fn resolve(&self, state: &mut ParticleState) -> ContactResult {
        self.pass(state, true)
    }

    fn contain_positions(&self, state: &mut ParticleState) -> ContactResult {
        self.pass(state, false)
    }

    fn name(&self) -> &str {
        "box_collider"
    }
}
