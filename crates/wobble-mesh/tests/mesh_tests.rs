//! Integration tests for wobble-mesh.

use wobble_math::Vector3;
use wobble_mesh::generators::{cube, quad_grid, uv_sphere};
use wobble_mesh::normals::compute_vertex_normals;
use wobble_mesh::topology::{unique_edges, Topology};
use wobble_mesh::{parse_obj, Face, PolygonMesh};

const PENTAGON_AND_TRIANGLE: &str = "\
# a pentagon sharing one edge with a triangle
v 0 0 0
v 1 0 0
v 1.5 1 0
v 0.5 1.8 0
v -0.5 1 0
v 0.5 -1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1 5//1
f 2 1 6
";

fn single_quad() -> PolygonMesh {
    PolygonMesh {
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        faces: vec![Face::new(vec![0, 1, 2, 3])],
        ..Default::default()
    }
}

// ─── Parsing Tests ────────────────────────────────────────────

#[test]
fn parse_vertices_and_faces() {
    let mesh = parse_obj(PENTAGON_AND_TRIANGLE).unwrap();
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.normals.len(), 1);
    assert_eq!(mesh.position(2), Vector3::new(1.5, 1.0, 0.0));
}

#[test]
fn parse_converts_to_zero_based() {
    let mesh = parse_obj(PENTAGON_AND_TRIANGLE).unwrap();
    assert_eq!(mesh.faces[0].vertices, vec![0, 1, 2, 3, 4]);
    assert_eq!(mesh.faces[1].vertices, vec![1, 0, 5]);
}

#[test]
fn parse_keeps_optional_index_lists_ragged() {
    let mesh = parse_obj(PENTAGON_AND_TRIANGLE).unwrap();
    // `1//1` has a normal field but no texture field.
    assert!(mesh.faces[0].tex_coords.is_empty());
    assert_eq!(mesh.faces[0].normals, vec![0; 5]);
    // Plain corners carry neither.
    assert!(mesh.faces[1].normals.is_empty());
}

#[test]
fn parse_full_corner_fields() {
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\nf 1/1/1 2/2/1 3/3/1\n";
    let mesh = parse_obj(src).unwrap();
    assert_eq!(mesh.tex_coords.len(), 3);
    assert_eq!(mesh.faces[0].tex_coords, vec![0, 1, 2]);
    assert_eq!(mesh.faces[0].normals, vec![0, 0, 0]);
}

#[test]
fn parse_ignores_unknown_records() {
    let src = "mtllib box.mtl\no Box\ng side\nusemtl red\ns off\nv 0 0 0\nv 1 0 0\nv 0 1 0\nl 1 2\nf 1 2 3\n";
    let mesh = parse_obj(src).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.face_count(), 1);
}

#[test]
fn parse_skips_malformed_records() {
    let src = "v 0 0 0\nv 1 0\nv 1 0 0\nv x y z\nv 0 1 0\nf 1 2\nf 1 2 3\n";
    let mesh = parse_obj(src).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    // The two-corner face is dropped.
    assert_eq!(mesh.face_count(), 1);
}

#[test]
fn parse_relative_indices() {
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
    let mesh = parse_obj(src).unwrap();
    assert_eq!(mesh.faces[0].vertices, vec![0, 1, 2]);
}

#[test]
fn parse_rejects_out_of_range_face() {
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n";
    assert!(parse_obj(src).is_err());
}

#[test]
fn parse_empty_input() {
    let mesh = parse_obj("").unwrap();
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn obj_string_reparses_to_same_topology() {
    let mesh = parse_obj(PENTAGON_AND_TRIANGLE).unwrap();
    let reparsed = PolygonMesh::from_obj_str(&mesh.to_obj_string()).unwrap();
    assert_eq!(reparsed.positions, mesh.positions);
    assert_eq!(reparsed.faces, mesh.faces);
}

// ─── PolygonMesh Tests ────────────────────────────────────────

#[test]
fn fan_triangulation_order() {
    let face = Face::new(vec![10, 11, 12, 13, 14]);
    let tris: Vec<[u32; 3]> = face.triangles().collect();
    assert_eq!(tris, vec![[10, 11, 12], [10, 12, 13], [10, 13, 14]]);
}

#[test]
fn face_edges_wrap() {
    let face = Face::new(vec![0, 1, 2]);
    let edges: Vec<(u32, u32)> = face.edges().collect();
    assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
}

#[test]
fn triangle_count_sums_fans() {
    let mesh = parse_obj(PENTAGON_AND_TRIANGLE).unwrap();
    assert_eq!(mesh.triangle_count(), 3 + 1);
}

#[test]
fn validate_ok() {
    assert!(single_quad().validate().is_ok());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = single_quad();
    mesh.faces[0].vertices[3] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_short_face() {
    let mut mesh = single_quad();
    mesh.faces.push(Face::new(vec![0, 1]));
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_non_finite_position() {
    let mut mesh = single_quad();
    mesh.positions[1][0] = f32::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn transform_moves_vertices() {
    let mut mesh = single_quad();
    mesh.transform(wobble_math::Quat::IDENTITY, Vector3::new(0.0, -2.0, 0.0));
    assert_eq!(mesh.positions[2], [1.0, -1.0, 0.0]);
}

#[test]
fn mesh_serialization() {
    let mesh = single_quad();
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: PolygonMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn cube_counts() {
    let mesh = cube(0.5);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate().is_ok());
}

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(3, 2, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate().is_ok());
}

#[test]
fn quad_grid_dimensions() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    assert_eq!(mesh.positions[0], [-1.0, 0.0, -1.0]);
    assert_eq!(mesh.positions[24], [1.0, 0.0, 1.0]);
    assert!(mesh.positions.iter().all(|p| p[1] == 0.0));
}

#[test]
fn uv_sphere_counts() {
    let mesh = uv_sphere(1.0, 6, 8);
    assert_eq!(mesh.vertex_count(), 2 + 5 * 8);
    assert_eq!(mesh.face_count(), 6 * 8);
    assert_eq!(mesh.triangle_count(), 8 + 4 * 8 * 2 + 8);
    assert!(mesh.validate().is_ok());
}

#[test]
fn uv_sphere_radius() {
    let mesh = uv_sphere(2.5, 8, 12);
    for i in 0..mesh.vertex_count() {
        let dist = mesh.position(i).length();
        assert!((dist - 2.5).abs() < 1e-4, "Vertex {} at distance {}", i, dist);
    }
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn unique_edges_share_across_faces() {
    let mesh = parse_obj(PENTAGON_AND_TRIANGLE).unwrap();
    let edges = unique_edges(&mesh.faces);
    // 5 pentagon edges + 3 triangle edges - 1 shared.
    assert_eq!(edges.len(), 7);
    assert_eq!(edges[0], [0, 1]);
    assert!(edges.iter().all(|e| e[0] < e[1]));
}

#[test]
fn unique_edges_insertion_order() {
    let faces = vec![Face::new(vec![2, 1, 0]), Face::new(vec![0, 1, 3])];
    let edges = unique_edges(&faces);
    assert_eq!(edges, vec![[1, 2], [0, 1], [0, 2], [1, 3], [0, 3]]);
}

#[test]
fn topology_cube_is_closed() {
    let topo = Topology::build(&cube(1.0));
    assert_eq!(topo.edges.len(), 12);
    assert_eq!(topo.triangle_count(), 12);
    assert!(topo.is_closed());
}

#[test]
fn topology_grid_has_boundary() {
    let topo = Topology::build(&quad_grid(2, 2, 1.0, 1.0));
    assert_eq!(topo.edges.len(), 2 * 3 + 2 * 3);
    assert_eq!(topo.boundary_edge_count(), 8);
    assert!(!topo.is_closed());
}

#[test]
fn topology_sphere_edges() {
    let topo = Topology::build(&uv_sphere(1.0, 6, 8));
    assert_eq!(topo.edges.len(), 8 * (2 * 6 - 1));
    assert!(topo.is_closed());
}

#[test]
fn topology_triangles_follow_face_order() {
    let topo = Topology::build(&single_quad());
    assert_eq!(topo.triangles, vec![[0, 1, 2], [0, 2, 3]]);
}

// ─── Normal Tests ─────────────────────────────────────────────

#[test]
fn flat_grid_normals_point_up() {
    let mesh = quad_grid(4, 4, 1.0, 1.0);
    let topo = Topology::build(&mesh);
    let mut normals = Vec::new();
    compute_vertex_normals(&mesh.position_vectors(), &topo.triangles, &mut normals);
    assert_eq!(normals.len(), mesh.vertex_count());
    for n in &normals {
        assert!(n.x.abs() < 1e-5);
        assert!((n.y - 1.0).abs() < 1e-5);
        assert!(n.z.abs() < 1e-5);
    }
}

#[test]
fn normals_are_unit_length() {
    let mesh = uv_sphere(1.0, 8, 12);
    let topo = Topology::build(&mesh);
    let mut normals = Vec::new();
    compute_vertex_normals(&mesh.position_vectors(), &topo.triangles, &mut normals);
    for (i, n) in normals.iter().enumerate() {
        assert!((n.length() - 1.0).abs() < 1e-5, "Normal at {} has length {}", i, n.length());
    }
}

#[test]
fn closed_mesh_normals_point_outward() {
    for mesh in [cube(0.5), uv_sphere(1.0, 6, 10)] {
        let topo = Topology::build(&mesh);
        let positions = mesh.position_vectors();
        let mut normals = Vec::new();
        compute_vertex_normals(&positions, &topo.triangles, &mut normals);
        for (p, n) in positions.iter().zip(&normals) {
            assert!(p.dot(*n) > 0.0, "normal {:?} at {:?} points inward", n, p);
        }
    }
}

#[test]
fn normals_ignore_source_normals() {
    let mut mesh = single_quad();
    mesh.normals = vec![[1.0, 0.0, 0.0]];
    let topo = Topology::build(&mesh);
    let mut normals = vec![Vector3::new(9.0, 9.0, 9.0); 2];
    compute_vertex_normals(&mesh.position_vectors(), &topo.triangles, &mut normals);
    assert_eq!(normals.len(), 4);
    assert!((normals[0].z - 1.0).abs() < 1e-6);
}

#[test]
fn triangles_weigh_equally_regardless_of_area() {
    // Corner 0 joins a large triangle facing +Z and a tiny one facing +Y.
    let positions = vec![
        Vector3::ZERO,
        Vector3::new(4.0, 0.0, 0.0),
        Vector3::new(0.0, 4.0, 0.0),
        Vector3::new(0.0, 0.0, 0.1),
        Vector3::new(0.1, 0.0, 0.0),
    ];
    let mut normals = Vec::new();
    compute_vertex_normals(&positions, &[[0, 1, 2], [0, 3, 4]], &mut normals);
    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert!(normals[0].x.abs() < 1e-6);
    assert!((normals[0].y - half).abs() < 1e-5);
    assert!((normals[0].z - half).abs() < 1e-5);
}

#[test]
fn degenerate_triangle_yields_zero_normal() {
    let positions = vec![Vector3::ZERO; 3];
    let mut normals = Vec::new();
    compute_vertex_normals(&positions, &[[0, 1, 2]], &mut normals);
    assert!(normals.iter().all(|n| *n == Vector3::ZERO));
}
