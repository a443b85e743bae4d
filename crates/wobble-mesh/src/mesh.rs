//! Core polygon mesh type.
//!
//! Faces keep their source arity; triangles only exist as a derived
//! view (see [`Face::triangles`]). Indices are 0-based in memory.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use wobble_math::{Quat, Vector3};
use wobble_types::{WobbleError, WobbleResult};

/// A planar polygon face.
///
/// `tex_coords` and `normals` hold the optional per-corner indices from
/// the source description. A corner with no such field simply has no
/// entry, so these lists may be shorter than `vertices`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Face {
    /// Particle indices, in winding order.
    pub vertices: Vec<u32>,
    /// Texture-coordinate indices (unused by the simulation).
    pub tex_coords: Vec<u32>,
    /// Source normal indices (unused by the simulation).
    pub normals: Vec<u32>,
}

impl Face {
    /// Creates a face from vertex indices only.
    pub fn new(vertices: Vec<u32>) -> Self {
        Self {
            vertices,
            tex_coords: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Number of corners.
    #[inline]
    pub fn arity(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles the fan triangulation produces.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }

    /// Fan triangulation: `(f[0], f[i+1], f[i+2])` for `i in 0..n-2`.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let v = &self.vertices;
        (0..self.triangle_count()).map(move |i| [v[0], v[i + 1], v[i + 2]])
    }

    /// Consecutive corner pairs, wrapping from the last corner to the first.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let v = &self.vertices;
        let n = v.len();
        (0..n).map(move |i| (v[i], v[(i + 1) % n]))
    }
}

/// A polygon mesh: vertex data plus faces of arbitrary arity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonMesh {
    /// Vertex positions in model space.
    pub positions: Vec<[f32; 3]>,
    /// Normals from the source description. Never used for shading;
    /// simulation normals are recomputed every step.
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates from the source description.
    pub tex_coords: Vec<[f32; 2]>,
    /// Faces, each with at least three corners.
    pub faces: Vec<Face>,
}

impl PolygonMesh {
    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, face_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity),
            normals: Vec::new(),
            tex_coords: Vec::new(),
            faces: Vec::with_capacity(face_capacity),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of fan triangles: Σ (arity − 2).
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(Face::triangle_count).sum()
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vector3 {
        Vector3::from(self.positions[i])
    }

    /// All vertex positions as vectors, in index order.
    pub fn position_vectors(&self) -> Vec<Vector3> {
        self.positions.iter().copied().map(Vector3::from).collect()
    }

    /// Rotates then translates every vertex in place.
    pub fn transform(&mut self, rotation: Quat, translation: Vector3) {
        for p in &mut self.positions {
            let moved = Vector3::from(*p).rotated(rotation) + translation;
            *p = moved.to_array();
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Every face has at least three corners
    /// - Every vertex index is within bounds
    /// - All positions are finite
    pub fn validate(&self) -> WobbleResult<()> {
        let n = self.vertex_count();

        for (i, p) in self.positions.iter().enumerate() {
            if !p.iter().all(|c| c.is_finite()) {
                return Err(WobbleError::InvalidMesh(format!(
                    "Vertex {} has a non-finite coordinate: {:?}",
                    i, p
                )));
            }
        }

        for (f, face) in self.faces.iter().enumerate() {
            if face.arity() < 3 {
                return Err(WobbleError::InvalidMesh(format!(
                    "Face {} has {} corners (need at least 3)",
                    f,
                    face.arity()
                )));
            }
            if let Some(&idx) = face.vertices.iter().find(|&&idx| idx as usize >= n) {
                return Err(WobbleError::InvalidMesh(format!(
                    "Face {} references vertex {} (vertex count: {})",
                    f, idx, n
                )));
            }
        }

        Ok(())
    }

    /// Writes the mesh back out in the line-oriented description format.
    ///
    /// Indices are written 1-based. Per-corner texture/normal indices are
    /// emitted only when a face carries one for every corner.
    pub fn to_obj_string(&self) -> String {
        let mut out = String::new();
        for p in &self.positions {
            let _ = writeln!(out, "v {} {} {}", p[0], p[1], p[2]);
        }
        for t in &self.tex_coords {
            let _ = writeln!(out, "vt {} {}", t[0], t[1]);
        }
        for nrm in &self.normals {
            let _ = writeln!(out, "vn {} {} {}", nrm[0], nrm[1], nrm[2]);
        }
        for face in &self.faces {
            let has_tex = face.tex_coords.len() == face.arity();
            let has_nrm = face.normals.len() == face.arity();
            out.push('f');
            for (k, &v) in face.vertices.iter().enumerate() {
                let _ = match (has_tex, has_nrm) {
                    (true, true) => write!(
                        out,
                        " {}/{}/{}",
                        v + 1,
                        face.tex_coords[k] + 1,
                        face.normals[k] + 1
                    ),
                    (false, true) => write!(out, " {}//{}", v + 1, face.normals[k] + 1),
                    (true, false) => write!(out, " {}/{}", v + 1, face.tex_coords[k] + 1),
                    (false, false) => write!(out, " {}", v + 1),
                };
            }
            out.push('\n');
        }
        out
    }
}
