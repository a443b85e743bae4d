//! Simulation controller.
//!
//! One `step(dt)`:
//! 1. **Stopped**: nothing happens.
//! 2. **Dynamic**: integrate forces, resolve box collisions, then check
//!    whether the body came to rest on the floor and should start settling.
//! 3. **Settling**: blend the orientation one step toward the leveled
//!    target and re-pose the undeformed shape; stop once leveled.
//! 4. Recompute vertex normals and refill the render buffers.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
use wobble_contact::{BoxCollider, Collider, ContactResult};
use wobble_math::Vector3;
use wobble_mesh::normals::compute_vertex_normals;
use wobble_mesh::topology::Topology;
use wobble_mesh::{parse_obj, PolygonMesh};
use wobble_render::RenderBuffers;
use wobble_solver::settle::should_settle;
use wobble_solver::{
    Integrator, ParticleState, SettlePhase, SimulationConfig, SpringSet, SymplecticEuler,
};
use wobble_telemetry::{EventBus, EventKind};
use wobble_types::{WobbleError, WobbleResult};

use crate::body::SoftBody;
use crate::mode::{ModeKind, SimulationMode};

/// Report of one call to [`Simulation::step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step index after this call (unchanged when nothing advanced).
    pub step: u64,
    /// Mode the step ran in.
    pub mode_before: ModeKind,
    /// Mode after the step.
    pub mode_after: ModeKind,
    /// Whether any simulation work happened.
    pub advanced: bool,
    /// Total kinetic energy after the step.
    pub kinetic_energy: f64,
    /// Collision corrections made this step.
    pub contacts: ContactResult,
    /// Remaining settle angle (radians), for settle steps.
    pub settle_remaining: Option<f32>,
}

/// Owns one soft body and advances it through the run/settle state machine.
pub struct Simulation {
    config: SimulationConfig,
    body: SoftBody,
    state: ParticleState,
    normals: Vec<Vector3>,
    buffers: RenderBuffers,
    mode: SimulationMode,
    integrator: Box<dyn Integrator>,
    collider: BoxCollider,
    events: EventBus,
    step_count: u64,
    sim_time: f64,
}

impl Simulation {
    /// Creates a stopped simulation with no body.
    pub fn new(config: SimulationConfig) -> WobbleResult<Self> {
        config.validate()?;
        let state = ParticleState::from_positions(Vec::new(), config.particle_mass)?;
        Ok(Self {
            collider: BoxCollider::from_config(&config),
            config,
            body: SoftBody::default(),
            state,
            normals: Vec::new(),
            buffers: RenderBuffers::default(),
            mode: SimulationMode::Stopped,
            integrator: Box::new(SymplecticEuler::new()),
            events: EventBus::new(),
            step_count: 0,
            sim_time: 0.0,
        })
    }

    /// Replaces the integrator.
    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = integrator;
        self
    }

    /// Parses a mesh description and loads it.
    ///
    /// On error the previously loaded body is kept.
    pub fn load_mesh(&mut self, source: &str) -> WobbleResult<()> {
        let mesh = parse_obj(source)?;
        self.load_polygon_mesh(mesh)
    }

    /// Loads a mesh, rebuilding every derived structure.
    ///
    /// The simulation is left stopped at the mesh's rest pose.
    pub fn load_polygon_mesh(&mut self, mesh: PolygonMesh) -> WobbleResult<()> {
        let body = SoftBody::new(mesh)?;
        let state = ParticleState::from_positions(
            body.rest_positions().to_vec(),
            self.config.particle_mass,
        )?;

        info!(
            particles = body.particle_count(),
            springs = body.springs().len(),
            triangles = body.topology().triangle_count(),
            "mesh loaded"
        );

        self.body = body;
        self.state = state;
        self.step_count = 0;
        self.sim_time = 0.0;
        self.set_mode(SimulationMode::Stopped);
        self.refresh_outputs();
        self.events.flush();
        Ok(())
    }

    /// Restores the rest pose and stops.
    ///
    /// Positions return to their load-time values, velocities are zeroed,
    /// springs are rebuilt and any settle phase is discarded.
    pub fn reset(&mut self) {
        self.state.reset_to(self.body.rest_positions());
        self.body.rebuild_springs();
        self.step_count = 0;
        self.sim_time = 0.0;
        self.set_mode(SimulationMode::Stopped);
        self.refresh_outputs();
        self.events.flush();
        debug!("simulation reset");
    }

    /// Starts dynamic simulation. No-op unless stopped.
    pub fn start(&mut self) {
        if !self.mode.is_running() {
            self.set_mode(SimulationMode::Dynamic);
            self.events.flush();
        }
    }

    /// Stops the simulation, discarding any settle phase.
    pub fn stop(&mut self) {
        if self.mode.is_running() {
            self.set_mode(SimulationMode::Stopped);
            self.events.flush();
        }
    }

    /// Returns true unless stopped.
    pub fn is_running(&self) -> bool {
        self.mode.is_running()
    }

    /// Replaces the configuration after validating it.
    ///
    /// Particle mass and the collision box take effect immediately; the
    /// spring network keeps its rest lengths.
    pub fn set_config(&mut self, config: SimulationConfig) -> WobbleResult<()> {
        config.validate()?;
        self.state.mass = config.particle_mass;
        self.collider = BoxCollider::from_config(&config);
        self.config = config;
        Ok(())
    }

    /// Advances one tick.
    pub fn step(&mut self, dt: f32) -> WobbleResult<StepOutcome> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "timestep must be positive and finite, got {dt}"
            )));
        }

        let mode_before = self.mode.kind();
        if mode_before == ModeKind::Stopped {
            return Ok(StepOutcome {
                step: self.step_count,
                mode_before,
                mode_after: mode_before,
                advanced: false,
                kinetic_energy: self.state.kinetic_energy(),
                contacts: ContactResult::default(),
                settle_remaining: None,
            });
        }

        let start = Instant::now();
        let step = self.step_count;
        self.events
            .record(step, EventKind::StepBegin { sim_time: self.sim_time });

        let mut settle_remaining = None;
        let mut next_mode = None;

        let contacts = match &mut self.mode {
            SimulationMode::Dynamic => {
                self.integrator
                    .step(&mut self.state, self.body.springs(), &self.config, dt)?;
                let contacts = self.collider.resolve(&mut self.state);

                if should_settle(&self.state, &self.config.settle) {
                    let phase = SettlePhase::begin(&self.state, self.body.rest_positions());
                    self.state.zero_velocities();
                    next_mode = Some(SimulationMode::Settling(phase));
                }
                contacts
            }
            SimulationMode::Settling(phase) => {
                let progress = phase.advance(&mut self.state, dt, &self.config.settle);
                let contacts = self.collider.contain_positions(&mut self.state);
                settle_remaining = Some(progress.remaining_angle);
                self.events.record(
                    step,
                    EventKind::SettleProgress {
                        remaining_angle: progress.remaining_angle,
                    },
                );
                if progress.finished {
                    next_mode = Some(SimulationMode::Stopped);
                }
                contacts
            }
            SimulationMode::Stopped => ContactResult::default(),
        };

        if let Some(mode) = next_mode {
            self.set_mode(mode);
        }

        self.step_count += 1;
        self.sim_time += dt as f64;
        self.refresh_outputs();

        let kinetic_energy = self.state.kinetic_energy();
        self.events
            .record(step, EventKind::Energy { kinetic: kinetic_energy });
        self.events.record(
            step,
            EventKind::Contacts {
                resolved_count: contacts.resolved_count,
                max_penetration: contacts.max_penetration,
            },
        );
        self.events.record(
            step,
            EventKind::StepEnd {
                wall_time: start.elapsed().as_secs_f64(),
            },
        );
        self.events.flush();

        trace!(step, mode = %mode_before, kinetic_energy, contacts = contacts.resolved_count, "step");

        Ok(StepOutcome {
            step: self.step_count,
            mode_before,
            mode_after: self.mode.kind(),
            advanced: true,
            kinetic_energy,
            contacts,
            settle_remaining,
        })
    }

    /// Switches mode, logging and emitting the transition.
    fn set_mode(&mut self, mode: SimulationMode) {
        let from = self.mode.kind();
        let to = mode.kind();
        self.mode = mode;
        if from != to {
            info!(%from, %to, step = self.step_count, "mode change");
            self.events.record(
                self.step_count,
                EventKind::ModeChange {
                    from: from.name().to_string(),
                    to: to.name().to_string(),
                },
            );
        }
    }

    /// Recomputes vertex normals and refills the render buffers.
    fn refresh_outputs(&mut self) {
        let triangles = &self.body.topology().triangles;
        compute_vertex_normals(&self.state.positions, triangles, &mut self.normals);
        self.buffers.fill(triangles, &self.state.positions, &self.normals);
    }

    // ─── Accessors ────────────────────────────────────────────

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn mode(&self) -> &SimulationMode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn body(&self) -> &SoftBody {
        &self.body
    }

    pub fn mesh(&self) -> &PolygonMesh {
        self.body.mesh()
    }

    pub fn topology(&self) -> &Topology {
        self.body.topology()
    }

    pub fn springs(&self) -> &SpringSet {
        self.body.springs()
    }

    /// Current particle state.
    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    /// Per-vertex normals as of the last step.
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    /// Flat render buffers, valid until the next step.
    pub fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    /// Total kinetic energy (Σ ½·m·|v|²).
    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy()
    }

    /// Simulated seconds since load or reset.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Steps advanced since load or reset.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// Telemetry bus; attach sinks here.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("mode", &self.mode.kind())
            .field("particles", &self.state.particle_count())
            .field("springs", &self.body.springs().len())
            .field("integrator", &self.integrator.name())
            .field("step_count", &self.step_count)
            .field("sim_time", &self.sim_time)
            .finish()
    }
}
