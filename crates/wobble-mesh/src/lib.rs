//! # wobble-mesh
//!
//! Polygon mesh representation for the Wobble simulator.
//!
//! ## Key Types
//!
//! - [`PolygonMesh`]: Vertex positions plus variable-arity faces, as
//!   loaded from a line-oriented mesh description.
//! - [`Topology`]: Fan triangulation and deduplicated edge list, built
//!   once per mesh and immutable afterwards.
//! - [`normals::compute_vertex_normals`]: Smooth per-vertex normals from
//!   current particle positions.
//! - Procedural generators (cube, quad grid, UV sphere).

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod obj;
pub mod topology;

pub use mesh::{Face, PolygonMesh};
pub use obj::parse_obj;
pub use topology::Topology;
