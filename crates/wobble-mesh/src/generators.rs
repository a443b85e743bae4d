//! Procedural mesh generators for benchmarks and testing.
//!
//! All generators produce outward-facing (counter-clockwise) winding and
//! keep their polygon faces; triangulation happens later in [`Topology`].
//!
//! [`Topology`]: crate::topology::Topology

use std::f32::consts::PI;

use crate::mesh::{Face, PolygonMesh};

/// Generates an axis-aligned cube centered at the origin.
///
/// 8 vertices and 6 quad faces, so 12 unique edges and 12 triangles.
///
/// # Example
/// ```
/// use wobble_mesh::generators::cube;
/// let mesh = cube(0.5);
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn cube(half_extent: f32) -> PolygonMesh {
    let h = half_extent;
    let mut mesh = PolygonMesh::with_capacity(8, 6);
    mesh.positions = vec![
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
    ];
    mesh.faces = [
        [0, 3, 2, 1], // -Z
        [4, 5, 6, 7], // +Z
        [0, 4, 7, 3], // -X
        [1, 2, 6, 5], // +X
        [0, 1, 5, 4], // -Y
        [3, 7, 6, 2], // +Y
    ]
    .into_iter()
    .map(|q| Face::new(q.to_vec()))
    .collect();
    mesh
}

/// Generates a flat rectangular quad grid in the XZ plane, facing +Y.
///
/// The grid spans `[-width/2, width/2]` in X and `[-depth/2, depth/2]` in Z
/// at Y = 0.
///
/// # Arguments
/// - `cols`: Number of quads along X (vertex count = cols + 1).
/// - `rows`: Number of quads along Z (vertex count = rows + 1).
/// - `width`: Total extent along X.
/// - `depth`: Total extent along Z.
///
/// # Example
/// ```
/// use wobble_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);   // 3×3 vertices
/// assert_eq!(mesh.face_count(), 4);     // 2×2 quads
/// assert_eq!(mesh.triangle_count(), 8); // 2 fan triangles per quad
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, depth: f32) -> PolygonMesh {
    let verts_x = cols + 1;
    let verts_z = rows + 1;
    let mut mesh = PolygonMesh::with_capacity(verts_x * verts_z, cols * rows);

    let half_w = width / 2.0;
    let half_d = depth / 2.0;

    for j in 0..verts_z {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            mesh.positions.push([-half_w + u * width, 0.0, -half_d + v * depth]);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let a = (j * verts_x + i) as u32;
            let b = a + verts_x as u32;
            mesh.faces.push(Face::new(vec![a, b, b + 1, a + 1]));
        }
    }

    mesh
}

/// Generates a closed UV sphere centered at the origin.
///
/// A single vertex at each pole, `stacks - 1` rings of `slices` vertices,
/// triangle fans at the caps and quads in between.
///
/// # Arguments
/// - `radius`: Sphere radius.
/// - `stacks`: Latitude divisions (at least 2).
/// - `slices`: Longitude divisions (at least 3).
pub fn uv_sphere(radius: f32, stacks: usize, slices: usize) -> PolygonMesh {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let ring_count = stacks - 1;
    let mut mesh = PolygonMesh::with_capacity(2 + ring_count * slices, stacks * slices);

    let top = 0u32;
    mesh.positions.push([0.0, radius, 0.0]);

    for r in 1..stacks {
        let phi = PI * r as f32 / stacks as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for j in 0..slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            mesh.positions.push([
                radius * sin_phi * cos_theta,
                radius * cos_phi,
                radius * sin_phi * sin_theta,
            ]);
        }
    }

    let bottom = mesh.positions.len() as u32;
    mesh.positions.push([0.0, -radius, 0.0]);

    // Index of vertex `j` on ring `r` (0-based ring, wrapping longitude).
    let ring = |r: usize, j: usize| (1 + r * slices + j % slices) as u32;

    for j in 0..slices {
        mesh.faces.push(Face::new(vec![top, ring(0, j + 1), ring(0, j)]));
    }
    for r in 0..ring_count.saturating_sub(1) {
        for j in 0..slices {
            mesh.faces.push(Face::new(vec![
                ring(r, j),
                ring(r, j + 1),
                ring(r + 1, j + 1),
                ring(r + 1, j),
            ]));
        }
    }
    for j in 0..slices {
        mesh.faces.push(Face::new(vec![
            ring(ring_count - 1, j),
            ring(ring_count - 1, j + 1),
            bottom,
        ]));
    }

    mesh
}
