//! Particle state: the per-step mutable tier.
//!
//! Positions and velocities are index-correlated with mesh vertices.
//! Topology (faces, springs) lives elsewhere and never changes while this
//! state is integrated.

use wobble_math::orientation::centroid;
use wobble_math::Vector3;
use wobble_mesh::PolygonMesh;
use wobble_types::{WobbleError, WobbleResult};

/// Positions and velocities of every particle, plus their shared mass.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    /// Current particle positions.
    pub positions: Vec<Vector3>,
    /// Current particle velocities.
    pub velocities: Vec<Vector3>,
    /// Mass shared by all particles.
    pub mass: f32,
}

impl ParticleState {
    /// Creates a state at rest at the given positions.
    pub fn from_positions(positions: Vec<Vector3>, mass: f32) -> WobbleResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "particle mass must be positive and finite, got {mass}"
            )));
        }
        let n = positions.len();
        Ok(Self {
            positions,
            velocities: vec![Vector3::ZERO; n],
            mass,
        })
    }

    /// Initialize state from a mesh: positions copied, velocities zero.
    pub fn from_mesh(mesh: &PolygonMesh, mass: f32) -> WobbleResult<Self> {
        Self::from_positions(mesh.position_vectors(), mass)
    }

    /// Number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    /// Restores the given positions and zeroes every velocity.
    pub fn reset_to(&mut self, rest: &[Vector3]) {
        self.positions.clear();
        self.positions.extend_from_slice(rest);
        self.velocities.clear();
        self.velocities.resize(rest.len(), Vector3::ZERO);
    }

    /// Zeroes every velocity.
    pub fn zero_velocities(&mut self) {
        self.velocities.fill(Vector3::ZERO);
    }

    /// Compute total kinetic energy: 0.5 * Σ m * ||v_i||².
    pub fn kinetic_energy(&self) -> f64 {
        let m = self.mass as f64;
        self.velocities
            .iter()
            .map(|v| 0.5 * m * v.length_squared() as f64)
            .sum()
    }

    /// Lowest particle Y coordinate (`+∞` when there are no particles).
    pub fn min_y(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.y)
            .fold(f32::INFINITY, f32::min)
    }

    /// Mean particle position.
    pub fn center(&self) -> Vector3 {
        centroid(&self.positions)
    }

    /// Returns true if every position and velocity component is finite.
    pub fn is_finite(&self) -> bool {
        let finite = |v: &Vector3| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();
        self.positions.iter().all(finite) && self.velocities.iter().all(finite)
    }

    /// Positions flattened as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Velocities flattened as `[vx0, vy0, vz0, ...]`.
    pub fn flat_velocities(&self) -> Vec<f32> {
        self.velocities.iter().flat_map(|v| v.to_array()).collect()
    }
}
