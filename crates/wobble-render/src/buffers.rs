//! Flat, non-indexed render buffers.
//!
//! One entry per triangle corner: triangle `t` occupies floats
//! `[9t, 9t + 9)` of both `positions` and `normals`, corners in fan order.
//! The buffers are rebuilt in place every step and stay valid until the
//! next one.

use serde::{Deserialize, Serialize};
use wobble_math::Vector3;

/// Per-triangle-vertex output buffers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderBuffers {
    /// `[x, y, z]` of every triangle corner.
    pub positions: Vec<f32>,
    /// Smoothed vertex normal of every triangle corner.
    pub normals: Vec<f32>,
    /// Texture coordinates. Always empty; kept so presenters can bind a
    /// fixed attribute layout.
    pub tex_coords: Vec<f32>,
}

impl RenderBuffers {
    /// Creates buffers sized for `triangle_count` triangles.
    pub fn with_triangle_capacity(triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangle_count * 9),
            normals: Vec::with_capacity(triangle_count * 9),
            tex_coords: Vec::new(),
        }
    }

    /// Rewrites the buffers from the fan triangles and per-vertex data.
    ///
    /// Corners referencing a vertex without a normal get a zero normal.
    pub fn fill(&mut self, triangles: &[[u32; 3]], positions: &[Vector3], normals: &[Vector3]) {
        self.positions.clear();
        self.normals.clear();
        self.tex_coords.clear();

        for tri in triangles {
            for &v in tri {
                let i = v as usize;
                let p = positions.get(i).copied().unwrap_or_default();
                let n = normals.get(i).copied().unwrap_or_default();
                self.positions.extend_from_slice(&p.to_array());
                self.normals.extend_from_slice(&n.to_array());
            }
        }
    }

    /// Number of triangles described.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    /// Number of triangle corners described.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of corner `i`.
    pub fn corner_position(&self, i: usize) -> Option<Vector3> {
        let s = self.positions.get(i * 3..i * 3 + 3)?;
        Some(Vector3::new(s[0], s[1], s[2]))
    }

    /// Normal of corner `i`.
    pub fn corner_normal(&self, i: usize) -> Option<Vector3> {
        let s = self.normals.get(i * 3..i * 3 + 3)?;
        Some(Vector3::new(s[0], s[1], s[2]))
    }
}
