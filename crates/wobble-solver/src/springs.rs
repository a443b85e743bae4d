//! Spring topology: one damped spring per unique mesh edge.

use serde::{Deserialize, Serialize};
use wobble_math::Vector3;
use wobble_mesh::topology::unique_edges;
use wobble_mesh::Face;
use wobble_types::{ParticleId, SpringId};

/// A spring between two particles.
///
/// `rest_length` is the particle distance at construction and is never
/// recomputed. Coincident endpoints give a zero rest length, which is a
/// valid (very stiff) spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Lower particle index of the edge.
    pub p0: ParticleId,
    /// Higher particle index of the edge.
    pub p1: ParticleId,
    /// Zero-force separation.
    pub rest_length: f32,
}

impl Spring {
    /// Creates a spring whose rest length is the current distance.
    pub fn between(p0: ParticleId, p1: ParticleId, positions: &[Vector3]) -> Self {
        let rest_length = positions[p0.index()].distance(positions[p1.index()]);
        Self {
            p0,
            p1,
            rest_length,
        }
    }
}

/// The springs of one body, in face-traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpringSet {
    springs: Vec<Spring>,
}

impl SpringSet {
    /// Builds one spring per undirected edge of `faces`.
    ///
    /// Edges shared by adjacent faces get a single spring. Rest lengths are
    /// measured at `positions`.
    pub fn from_faces(faces: &[Face], positions: &[Vector3]) -> Self {
        Self::from_edges(&unique_edges(faces), positions)
    }

    /// Builds one spring per given edge.
    pub fn from_edges(edges: &[[u32; 2]], positions: &[Vector3]) -> Self {
        let springs = edges
            .iter()
            .map(|&[a, b]| Spring::between(ParticleId(a), ParticleId(b), positions))
            .collect();
        Self { springs }
    }

    /// Number of springs.
    #[inline]
    pub fn len(&self) -> usize {
        self.springs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    /// Returns the spring with the given id.
    #[inline]
    pub fn get(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Spring> {
        self.springs.iter()
    }

    pub fn as_slice(&self) -> &[Spring] {
        &self.springs
    }
}

impl<'a> IntoIterator for &'a SpringSet {
    type Item = &'a Spring;
    type IntoIter = std::slice::Iter<'a, Spring>;

    fn into_iter(self) -> Self::IntoIter {
        self.springs.iter()
    }
}

impl FromIterator<Spring> for SpringSet {
    fn from_iter<I: IntoIterator<Item = Spring>>(iter: I) -> Self {
        Self {
            springs: iter.into_iter().collect(),
        }
    }
}
