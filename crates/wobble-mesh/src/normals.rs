//! Vertex normal computation from current particle positions.
//!
//! Normals from the source description are never used: the body deforms
//! every step, so normals are rebuilt from scratch each time.

use wobble_math::Vector3;

/// Recompute smooth per-vertex normals.
///
/// For each fan triangle `(a, b, c)` the unit face normal
/// `normalize((b - a) × (c - a))` is added to all three corners, then every
/// accumulated normal is renormalized. Each triangle contributes equally
/// regardless of its area. Degenerate triangles contribute zero, and a
/// vertex touched only by degenerate triangles ends up with a zero normal.
///
/// `normals` is resized to `positions.len()`.
pub fn compute_vertex_normals(
    positions: &[Vector3],
    triangles: &[[u32; 3]],
    normals: &mut Vec<Vector3>,
) {
    normals.clear();
    normals.resize(positions.len(), Vector3::ZERO);

    for &[ia, ib, ic] in triangles {
        let (a, b, c) = (ia as usize, ib as usize, ic as usize);
        let e1 = positions[b] - positions[a];
        let e2 = positions[c] - positions[a];
        let face_normal = e1.cross(e2).normalized();

        normals[a] += face_normal;
        normals[b] += face_normal;
        normals[c] += face_normal;
    }

    for n in normals.iter_mut() {
        n.normalize_mut();
    }
}
