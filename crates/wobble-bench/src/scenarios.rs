//! Benchmark scenarios: procedural mesh + placement + config for each case.
//!
//! Three canonical scenarios, all dropped inside the unit collision box:
//! 1. **Cube drop**: A tilted cube falls, bounces and settles
//! 2. **Slab drop**: A flat quad grid falls flat onto the floor
//! 3. **Sphere drop**: A stiffer UV sphere falls off-center

use serde::{Deserialize, Serialize};
use wobble_math::{EulerAngles, Quat, Vector3};
use wobble_mesh::generators::{cube, quad_grid, uv_sphere};
use wobble_mesh::PolygonMesh;
use wobble_solver::SimulationConfig;
use wobble_types::constants::DEFAULT_DT;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Tilted cube dropped from above the center.
    CubeDrop,
    /// Flat grid dropped onto the floor.
    SlabDrop,
    /// Firm sphere dropped off-center.
    SphereDrop,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::CubeDrop,
            ScenarioKind::SlabDrop,
            ScenarioKind::SphereDrop,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::CubeDrop => "cube_drop",
            ScenarioKind::SlabDrop => "slab_drop",
            ScenarioKind::SphereDrop => "sphere_drop",
        }
    }

    /// Looks a scenario up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Body mesh, already placed in world space.
    pub mesh: PolygonMesh,
    /// Simulation parameters.
    pub config: SimulationConfig,
    /// Maximum number of steps to simulate.
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f32,
}

impl Scenario {
    /// Create the cube drop scenario.
    ///
    /// A 0.5 cube tilted on two axes, released from y = 0.3, for up to
    /// 10 seconds.
    pub fn cube_drop() -> Self {
        let mut mesh = cube(0.25);
        let tilt = EulerAngles {
            yaw: 0.5,
            pitch: 0.3,
            roll: 0.2,
        };
        mesh.transform(tilt.to_quat(), Vector3::new(0.0, 0.3, 0.0));

        Self {
            kind: ScenarioKind::CubeDrop,
            mesh,
            config: SimulationConfig::default(),
            timesteps: 600,
            dt: DEFAULT_DT,
        }
    }

    /// Create the slab drop scenario.
    ///
    /// A 0.8 × 0.8 grid at 6×6 resolution, released flat from y = 0.5.
    pub fn slab_drop() -> Self {
        let mut mesh = quad_grid(6, 6, 0.8, 0.8);
        mesh.transform(Quat::IDENTITY, Vector3::new(0.0, 0.5, 0.0));

        Self {
            kind: ScenarioKind::SlabDrop,
            mesh,
            config: SimulationConfig::default(),
            timesteps: 600,
            dt: DEFAULT_DT,
        }
    }

    /// Create the sphere drop scenario.
    ///
    /// A radius-0.3 UV sphere (8 stacks, 12 slices) with the firm preset,
    /// released off-center so it hits a wall as well as the floor.
    pub fn sphere_drop() -> Self {
        let mut mesh = uv_sphere(0.3, 8, 12);
        mesh.transform(Quat::IDENTITY, Vector3::new(0.5, 0.4, -0.2));

        Self {
            kind: ScenarioKind::SphereDrop,
            mesh,
            config: SimulationConfig {
                gravity: [2.0, -9.8, 0.0],
                ..SimulationConfig::firm()
            },
            timesteps: 600,
            dt: DEFAULT_DT,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::CubeDrop => Self::cube_drop(),
            ScenarioKind::SlabDrop => Self::slab_drop(),
            ScenarioKind::SphereDrop => Self::sphere_drop(),
        }
    }

    /// Overrides the step budget.
    pub fn with_timesteps(mut self, timesteps: u32) -> Self {
        self.timesteps = timesteps;
        self
    }
}
