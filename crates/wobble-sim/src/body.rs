//! The immutable tier of a simulated body.
//!
//! Everything here is fixed when a mesh is loaded: face topology, the
//! spring network and the rest pose. Only [`ParticleState`] changes while
//! the simulation runs.
//!
//! [`ParticleState`]: wobble_solver::ParticleState

use tracing::debug;
use wobble_math::Vector3;
use wobble_mesh::topology::Topology;
use wobble_mesh::PolygonMesh;
use wobble_solver::SpringSet;
use wobble_types::WobbleResult;

/// A loaded mesh and the structures derived from it.
#[derive(Debug, Clone, Default)]
pub struct SoftBody {
    mesh: PolygonMesh,
    topology: Topology,
    rest_positions: Vec<Vector3>,
    springs: SpringSet,
}

impl SoftBody {
    /// Validates `mesh` and builds topology, springs and rest pose.
    pub fn new(mesh: PolygonMesh) -> WobbleResult<Self> {
        mesh.validate()?;

        let topology = Topology::build(&mesh);
        let rest_positions = mesh.position_vectors();
        let springs = SpringSet::from_edges(&topology.edges, &rest_positions);

        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            triangles = topology.triangle_count(),
            springs = springs.len(),
            closed = topology.is_closed(),
            "soft body built"
        );

        Ok(Self {
            mesh,
            topology,
            rest_positions,
            springs,
        })
    }

    /// Rebuilds the spring network from the rest pose.
    pub fn rebuild_springs(&mut self) {
        self.springs = SpringSet::from_edges(&self.topology.edges, &self.rest_positions);
    }

    /// The source mesh.
    pub fn mesh(&self) -> &PolygonMesh {
        &self.mesh
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Model-space positions at load time.
    ///
    /// Reset restores these, and the settle phase re-poses them rotated
    /// about the live body's center.
    pub fn rest_positions(&self) -> &[Vector3] {
        &self.rest_positions
    }

    pub fn springs(&self) -> &SpringSet {
        &self.springs
    }

    /// Number of particles.
    pub fn particle_count(&self) -> usize {
        self.rest_positions.len()
    }
}
