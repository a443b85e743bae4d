//! Integration tests for wobble-solver.

use wobble_math::orientation::{angular_distance, centroid};
use wobble_math::{EulerAngles, Quat, Vector3};
use wobble_mesh::generators::{cube, quad_grid, uv_sphere};
use wobble_mesh::topology::Topology;
use wobble_mesh::{parse_obj, PolygonMesh};
use wobble_solver::config::{SettleConfig, SimulationConfig};
use wobble_solver::integrator::{accumulate_forces, SymplecticEuler};
use wobble_solver::settle::{should_settle, SettlePhase};
use wobble_solver::springs::{Spring, SpringSet};
use wobble_solver::state::ParticleState;
use wobble_solver::strategy::Integrator;
use wobble_types::{ParticleId, SpringId, WobbleError};

fn two_particles(distance: f32) -> ParticleState {
    ParticleState::from_positions(
        vec![Vector3::ZERO, Vector3::new(distance, 0.0, 0.0)],
        0.1,
    )
    .unwrap()
}

fn single_spring(rest_length: f32) -> SpringSet {
    std::iter::once(Spring {
        p0: ParticleId(0),
        p1: ParticleId(1),
        rest_length,
    })
    .collect()
}

// ─── SimulationConfig Tests ───────────────────────────────────

#[test]
fn default_config_is_valid() {
    assert!(SimulationConfig::default().validate().is_ok());
    assert!(SimulationConfig::weightless().validate().is_ok());
    assert!(SimulationConfig::firm().validate().is_ok());
}

#[test]
fn zero_mass_is_rejected() {
    let config = SimulationConfig {
        particle_mass: 0.0,
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, WobbleError::InvalidConfig(_)));
    assert!(err.to_string().contains("particle_mass"));
}

#[test]
fn bad_parameters_are_rejected() {
    let cases = [
        SimulationConfig { stiffness: -1.0, ..Default::default() },
        SimulationConfig { damping: f32::NAN, ..Default::default() },
        SimulationConfig { restitution: 1.5, ..Default::default() },
        SimulationConfig { half_extent: 0.0, ..Default::default() },
        SimulationConfig { dt: 0.0, ..Default::default() },
        SimulationConfig { gravity: [0.0, f32::INFINITY, 0.0], ..Default::default() },
        SimulationConfig {
            settle: SettleConfig { speed: 0.0, ..Default::default() },
            ..Default::default()
        },
        SimulationConfig {
            settle: SettleConfig { angular_epsilon: -0.1, ..Default::default() },
            ..Default::default()
        },
    ];
    for config in cases {
        assert!(config.validate().is_err(), "accepted {:?}", config);
    }
}

#[test]
fn config_from_partial_toml() {
    let config = SimulationConfig::from_toml_str(
        "stiffness = 12.5\nrestitution = 0.0\n\n[settle]\nspeed = 4.0\n",
    )
    .unwrap();
    assert_eq!(config.stiffness, 12.5);
    assert_eq!(config.restitution, 0.0);
    assert_eq!(config.settle.speed, 4.0);
    // Untouched fields keep their defaults.
    assert_eq!(config.particle_mass, SimulationConfig::default().particle_mass);
    assert_eq!(config.settle.ground_threshold, -0.95);
}

#[test]
fn config_toml_rejects_invalid_values() {
    assert!(SimulationConfig::from_toml_str("particle_mass = 0.0").is_err());
    assert!(SimulationConfig::from_toml_str("stiffness = \"stiff\"").is_err());
}

#[test]
fn config_toml_round_trip() {
    let config = SimulationConfig::firm();
    let text = config.to_toml_string().unwrap();
    let recovered = SimulationConfig::from_toml_str(&text).unwrap();
    assert_eq!(recovered, config);
}

#[test]
fn config_json_round_trip() {
    let config = SimulationConfig::weightless();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"settle\""));
    let recovered: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, config);
}

#[test]
fn config_json_fills_missing_fields() {
    let config: SimulationConfig =
        serde_json::from_str(r#"{"stiffness": 8.0, "settle": {"speed": 3.0}}"#).unwrap();
    assert_eq!(config.stiffness, 8.0);
    assert_eq!(config.settle.speed, 3.0);
    assert_eq!(config.particle_mass, SimulationConfig::default().particle_mass);
    assert_eq!(config.settle.angular_epsilon, SettleConfig::default().angular_epsilon);
    assert!(config.validate().is_ok());
}

// ─── ParticleState Tests ──────────────────────────────────────

#[test]
fn state_from_mesh() {
    let mesh = cube(0.5);
    let state = ParticleState::from_mesh(&mesh, 0.1).unwrap();
    assert_eq!(state.particle_count(), 8);
    assert_eq!(state.positions[6], Vector3::new(0.5, 0.5, 0.5));
    assert!(state.velocities.iter().all(|v| *v == Vector3::ZERO));
    assert_eq!(state.kinetic_energy(), 0.0);
}

#[test]
fn state_rejects_zero_mass() {
    assert!(ParticleState::from_mesh(&cube(0.5), 0.0).is_err());
    assert!(ParticleState::from_positions(vec![], -1.0).is_err());
}

#[test]
fn state_kinetic_energy() {
    let mut state = two_particles(1.0);
    state.velocities[0] = Vector3::new(1.0, 0.0, 0.0);
    state.velocities[1] = Vector3::new(0.0, 2.0, 0.0);
    // 0.5 * 0.1 * (1 + 4)
    assert!((state.kinetic_energy() - 0.25).abs() < 1e-6);
}

#[test]
fn state_min_y_and_center() {
    let state = ParticleState::from_mesh(&cube(0.5), 1.0).unwrap();
    assert_eq!(state.min_y(), -0.5);
    assert!(state.center().length() < 1e-6);

    let empty = ParticleState::from_positions(vec![], 1.0).unwrap();
    assert_eq!(empty.min_y(), f32::INFINITY);
}

#[test]
fn state_reset_restores_rest() {
    let mesh = cube(0.5);
    let rest = mesh.position_vectors();
    let mut state = ParticleState::from_mesh(&mesh, 0.1).unwrap();
    state.positions[3] = Vector3::new(9.0, 9.0, 9.0);
    state.velocities[3] = Vector3::new(1.0, 1.0, 1.0);
    state.reset_to(&rest);
    assert_eq!(state.positions, rest);
    assert_eq!(state.kinetic_energy(), 0.0);
}

#[test]
fn state_flat_buffers() {
    let state = two_particles(2.0);
    assert_eq!(state.flat_positions(), vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    assert_eq!(state.flat_velocities(), vec![0.0; 6]);
    assert!(state.is_finite());
}

// ─── Spring Topology Tests ────────────────────────────────────

#[test]
fn one_spring_per_unique_edge() {
    for mesh in [cube(0.5), quad_grid(3, 4, 1.0, 1.0), uv_sphere(0.5, 5, 7)] {
        let topo = Topology::build(&mesh);
        let springs = SpringSet::from_faces(&mesh.faces, &mesh.position_vectors());
        assert_eq!(springs.len(), topo.edges.len());

        let mut keys: Vec<(ParticleId, ParticleId)> =
            springs.iter().map(|s| (s.p0, s.p1)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), springs.len(), "duplicate spring found");
    }
}

#[test]
fn shared_edge_gets_single_spring() {
    let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n").unwrap();
    let springs = SpringSet::from_faces(&mesh.faces, &mesh.position_vectors());
    assert_eq!(springs.len(), 5);
}

#[test]
fn rest_lengths_match_load_positions() {
    let mesh = cube(0.5);
    let positions = mesh.position_vectors();
    let springs = SpringSet::from_faces(&mesh.faces, &positions);
    for s in &springs {
        let d = positions[s.p0.index()].distance(positions[s.p1.index()]);
        assert_eq!(s.rest_length, d);
        assert!((s.rest_length - 1.0).abs() < 1e-6);
    }
}

#[test]
fn springs_follow_face_order() {
    let mesh = cube(0.5);
    let springs = SpringSet::from_faces(&mesh.faces, &mesh.position_vectors());
    // First face is [0, 3, 2, 1].
    let first = springs.get(SpringId(0)).unwrap();
    assert_eq!((first.p0, first.p1), (ParticleId(0), ParticleId(3)));
    let second = springs.get(SpringId(1)).unwrap();
    assert_eq!((second.p0, second.p1), (ParticleId(2), ParticleId(3)));
}

#[test]
fn spring_serialization() {
    let springs = SpringSet::from_faces(&cube(0.5).faces, &cube(0.5).position_vectors());
    let spring = *springs.get(SpringId(0)).unwrap();
    let json = serde_json::to_string(&spring).unwrap();
    assert!(json.contains("rest_length"));
    let recovered: Spring = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, spring);
}

#[test]
fn coincident_endpoints_give_zero_rest_length() {
    let mut mesh = PolygonMesh::default();
    mesh.positions = vec![[0.0; 3], [0.0; 3], [1.0, 0.0, 0.0]];
    mesh.faces = vec![wobble_mesh::Face::new(vec![0, 1, 2])];
    let springs = SpringSet::from_faces(&mesh.faces, &mesh.position_vectors());
    assert_eq!(springs.get(SpringId(0)).unwrap().rest_length, 0.0);
}

// ─── Force Accumulation Tests ─────────────────────────────────

#[test]
fn gravity_only_without_springs() {
    let state = two_particles(1.0);
    let config = SimulationConfig::default();
    let mut forces = Vec::new();
    accumulate_forces(&state, &SpringSet::default(), &config, &mut forces);
    let expected = Vector3::new(0.0, -9.8 * 0.1, 0.0);
    assert_eq!(forces, vec![expected, expected]);
}

#[test]
fn spring_forces_cancel_exactly() {
    let config = SimulationConfig::weightless();
    let springs = single_spring(1.0);
    let mut forces = Vec::new();
    for d in [0.0, 0.3, 1.0, 1.7, 2.0, 13.25] {
        let mut state = two_particles(d);
        state.positions[1].y = 0.37 * d;
        state.velocities[0] = Vector3::new(0.2, -0.1, 0.05);
        state.velocities[1] = Vector3::new(-0.3, 0.4, 0.0);
        accumulate_forces(&state, &springs, &config, &mut forces);
        assert_eq!(forces[0] + forces[1], Vector3::ZERO, "displacement {d}");
    }
}

#[test]
fn stretched_spring_pulls_together() {
    let config = SimulationConfig {
        damping: 0.0,
        ..SimulationConfig::weightless()
    };
    let state = two_particles(2.0);
    let mut forces = Vec::new();
    accumulate_forces(&state, &single_spring(1.0), &config, &mut forces);
    // k * (|d| - r) = 20 * 1
    assert_eq!(forces[0], Vector3::new(20.0, 0.0, 0.0));
    assert_eq!(forces[1], Vector3::new(-20.0, 0.0, 0.0));
}

#[test]
fn zero_length_spring_has_no_elastic_force() {
    let config = SimulationConfig::weightless();
    let state = two_particles(0.0);
    let mut forces = Vec::new();
    accumulate_forces(&state, &single_spring(1.0), &config, &mut forces);
    assert_eq!(forces[0], Vector3::ZERO);
    assert!(forces[0].x.is_finite());
}

#[test]
fn damping_acts_on_full_relative_velocity() {
    let config = SimulationConfig {
        damping: 0.5,
        damping_scale: 2.0,
        ..SimulationConfig::weightless()
    };
    // Spring at rest along X; particle 1 moves along Z, orthogonal to it.
    let mut state = two_particles(1.0);
    state.velocities[1] = Vector3::new(0.0, 0.0, 1.0);
    let mut forces = Vec::new();
    accumulate_forces(&state, &single_spring(1.0), &config, &mut forces);
    assert_eq!(forces[0], Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(forces[1], Vector3::new(0.0, 0.0, -1.0));
}

// ─── Integrator Tests ─────────────────────────────────────────

#[test]
fn semi_implicit_order() {
    let config = SimulationConfig::default();
    let mut state = ParticleState::from_positions(vec![Vector3::ZERO], 0.1).unwrap();
    let mut integrator = SymplecticEuler::new();
    integrator
        .step(&mut state, &SpringSet::default(), &config, 0.016)
        .unwrap();
    let v = -9.8 * 0.016;
    assert!((state.velocities[0].y - v).abs() < 1e-6);
    // Position uses the already-updated velocity.
    assert!((state.positions[0].y - v * 0.016).abs() < 1e-7);
}

#[test]
fn integrator_rejects_bad_timestep() {
    let config = SimulationConfig::default();
    let mut state = two_particles(1.0);
    let mut integrator = SymplecticEuler::new();
    let springs = single_spring(1.0);
    assert!(integrator.step(&mut state, &springs, &config, 0.0).is_err());
    assert!(integrator.step(&mut state, &springs, &config, f32::NAN).is_err());
}

#[test]
fn integrator_rejects_zero_mass_state() {
    let config = SimulationConfig::default();
    let mut state = two_particles(1.0);
    state.mass = 0.0;
    let mut integrator = SymplecticEuler::new();
    let err = integrator
        .step(&mut state, &single_spring(1.0), &config, 0.016)
        .unwrap_err();
    assert!(matches!(err, WobbleError::InvalidConfig(_)));
    assert!(state.is_finite());
}

#[test]
fn integrator_reports_step() {
    let config = SimulationConfig::weightless();
    let mut state = two_particles(2.0);
    let mut integrator = SymplecticEuler::new();
    let result = integrator
        .step(&mut state, &single_spring(1.0), &config, 0.016)
        .unwrap();
    assert_eq!(result.spring_count, 1);
    assert!((result.max_force - 20.0).abs() < 1e-4);
    assert_eq!(integrator.name(), "symplectic_euler");
    assert_eq!(integrator.last_forces().len(), 2);
}

#[test]
fn single_spring_relaxation() {
    let config = SimulationConfig {
        damping: 0.0,
        ..SimulationConfig::weightless()
    };
    let springs = single_spring(1.0);
    let mut state = two_particles(2.0);
    let mut integrator = SymplecticEuler::new();

    let steps = 2000;
    let mut total = 0.0f64;
    let mut late_max = 0.0f32;
    for n in 0..steps {
        integrator.step(&mut state, &springs, &config, 0.016).unwrap();
        let separation = state.positions[0].distance(state.positions[1]);
        total += separation as f64;
        if n >= steps - 200 {
            late_max = late_max.max(separation);
        }
    }
    let mean = total / steps as f64;
    assert!((mean - 1.0).abs() < 0.05, "mean separation {mean}");
    // Oscillation stays bounded: no drift away from the rest length.
    assert!(late_max < 2.2, "late separation {late_max}");
    // Momentum is conserved: the pair's midpoint does not move.
    let mid = (state.positions[0] + state.positions[1]) * 0.5;
    assert!((mid.x - 1.0).abs() < 1e-3);
}

// ─── Settle Tests ─────────────────────────────────────────────

fn tilted_cube_state(rotation: Quat, lift: f32) -> (ParticleState, Vec<Vector3>) {
    let mesh = cube(0.25);
    let reference = mesh.position_vectors();
    let positions = reference
        .iter()
        .map(|p| p.rotated(rotation) + Vector3::new(0.0, lift, 0.0))
        .collect();
    (ParticleState::from_positions(positions, 0.1).unwrap(), reference)
}

#[test]
fn settle_requires_rest_and_ground() {
    let config = SettleConfig::default();

    let (grounded, _) = tilted_cube_state(Quat::IDENTITY, -0.74);
    assert!(should_settle(&grounded, &config));

    let (airborne, _) = tilted_cube_state(Quat::IDENTITY, 0.0);
    assert!(!should_settle(&airborne, &config));

    let (mut moving, _) = tilted_cube_state(Quat::IDENTITY, -0.74);
    moving.velocities[0] = Vector3::new(0.0, 1.0, 0.0);
    assert!(!should_settle(&moving, &config));

    let empty = ParticleState::from_positions(vec![], 0.1).unwrap();
    assert!(!should_settle(&empty, &config));
}

#[test]
fn settle_target_is_leveled_start() {
    let rotation = EulerAngles { yaw: 0.6, pitch: 0.3, roll: -0.2 }.to_quat();
    let (state, reference) = tilted_cube_state(rotation, -0.6);
    let phase = SettlePhase::begin(&state, &reference);

    let start = EulerAngles::from_quat(phase.start());
    let target = EulerAngles::from_quat(phase.target());
    assert!((start.yaw - target.yaw).abs() < 1e-4);
    assert!(target.pitch.abs() < 1e-5);
    assert!(target.roll.abs() < 1e-5);
    assert_eq!(phase.current(), phase.start());
    assert!((phase.center() - state.center()).length() < 1e-6);
}

#[test]
fn settle_angle_decreases_until_finished() {
    let rotation = EulerAngles { yaw: -0.4, pitch: 0.5, roll: 0.7 }.to_quat();
    let (mut state, reference) = tilted_cube_state(rotation, -0.6);
    let config = SettleConfig::default();
    let mut phase = SettlePhase::begin(&state, &reference);

    let mut previous = phase.remaining_angle();
    assert!(previous > config.angular_epsilon);

    let mut steps = 0;
    loop {
        let progress = phase.advance(&mut state, 0.016, &config);
        assert!(
            progress.remaining_angle <= previous + 1e-4,
            "angle grew from {previous} to {}",
            progress.remaining_angle
        );
        previous = progress.remaining_angle;
        steps += 1;
        if progress.finished {
            break;
        }
        assert!(steps < 2000, "settle never finished");
    }

    assert_eq!(phase.current(), phase.target());
    assert!(angular_distance(phase.current(), phase.target()) < 1e-3);
    assert!(state.velocities.iter().all(|v| *v == Vector3::ZERO));
}

#[test]
fn settle_reposes_undeformed_shape() {
    let (mut state, reference) = tilted_cube_state(Quat::from_rotation_x(0.3), -0.6);
    // Squash the live body; settling must ignore the deformation.
    for p in &mut state.positions {
        p.y *= 0.5;
    }
    let config = SettleConfig::default();
    let mut phase = SettlePhase::begin(&state, &reference);
    phase.advance(&mut state, 0.016, &config);

    let original_diagonal = reference[0].distance(reference[6]);
    let posed_diagonal = state.positions[0].distance(state.positions[6]);
    assert!((original_diagonal - posed_diagonal).abs() < 1e-5);

    let posed_center = centroid(&state.positions);
    assert!((posed_center - phase.center()).length() < 1e-5);
}

#[test]
fn settle_full_speed_finishes_in_one_step() {
    let (mut state, reference) = tilted_cube_state(Quat::from_rotation_z(0.8), -0.6);
    let config = SettleConfig {
        speed: 1000.0,
        ..Default::default()
    };
    let mut phase = SettlePhase::begin(&state, &reference);
    let progress = phase.advance(&mut state, 0.016, &config);
    assert!(progress.finished);
    assert_eq!(progress.remaining_angle, 0.0);
}
