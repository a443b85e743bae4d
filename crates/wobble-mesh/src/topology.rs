//! Mesh topology: fan triangulation and the deduplicated edge list.
//!
//! Built once when a mesh is loaded. Topology never changes while the
//! simulation runs; only particle positions do.

use std::collections::{HashMap, HashSet};

use crate::mesh::{Face, PolygonMesh};

/// Precomputed topology for a polygon mesh.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    /// Fan triangles of every face, in face order. This order fixes both
    /// the normal accumulation order and the render buffer layout.
    pub triangles: Vec<[u32; 3]>,

    /// Unique undirected edges as `[v_min, v_max]`, in first-seen order.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, how many face sides use it.
    /// Boundary edges have a count of 1.
    pub edge_face_counts: Vec<u32>,
}

impl Topology {
    /// Build topology from a polygon mesh.
    pub fn build(mesh: &PolygonMesh) -> Self {
        let triangles: Vec<[u32; 3]> = mesh.faces.iter().flat_map(Face::triangles).collect();

        let edges = unique_edges(&mesh.faces);

        let mut uses: HashMap<(u32, u32), u32> = HashMap::with_capacity(edges.len());
        for face in &mesh.faces {
            for (a, b) in face.edges() {
                *uses.entry(edge_key(a, b)).or_default() += 1;
            }
        }
        let edge_face_counts = edges
            .iter()
            .map(|&[a, b]| uses.get(&(a, b)).copied().unwrap_or(0))
            .collect();

        Self {
            triangles,
            edges,
            edge_face_counts,
        }
    }

    /// Returns the number of fan triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the number of boundary edges (used by exactly one face).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_face_counts.iter().filter(|&&c| c == 1).count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        !self.edges.is_empty() && self.boundary_edge_count() == 0
    }
}

/// Canonical key for an undirected edge.
#[inline]
pub fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Collects every undirected edge exactly once.
///
/// Walks each face's consecutive corner pairs (wrapping) in face order and
/// keeps an edge the first time its `(min, max)` key is seen. The result is
/// deterministic for a fixed face list.
pub fn unique_edges(faces: &[Face]) -> Vec<[u32; 2]> {
    let mut seen: HashSet<(u32, u32)> = HashSet::new();
    let mut edges = Vec::new();
    for face in faces {
        for (a, b) in face.edges() {
            let key = edge_key(a, b);
            if seen.insert(key) {
                edges.push([key.0, key.1]);
            }
        }
    }
    edges
}
