//! CLI command implementations.

use std::path::{Path, PathBuf};

use tracing::Level;
use wobble_bench::metrics::BenchmarkMetrics;
use wobble_bench::runner::BenchmarkRunner;
use wobble_bench::scenarios::{Scenario, ScenarioKind};
use wobble_debug::snapshot::StateSnapshot;
use wobble_mesh::topology::Topology;
use wobble_mesh::{parse_obj, PolygonMesh};
use wobble_render::{JsonFrameExporter, RenderFrame, Renderer};
use wobble_sim::{ModeKind, Simulation};
use wobble_solver::SimulationConfig;
use wobble_telemetry::TracingSink;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Options of the `simulate` command.
pub struct SimulateArgs {
    pub mesh: Option<PathBuf>,
    pub scenario: String,
    pub config: Option<PathBuf>,
    pub steps: u32,
    pub dt: Option<f32>,
    pub frames: Option<PathBuf>,
    pub every: u32,
    pub snapshot: Option<PathBuf>,
    pub trace_events: bool,
}

fn load_config(path: &Path) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(SimulationConfig::from_toml_str(&content)?)
}

fn unknown_scenario(name: &str) -> Box<dyn std::error::Error> {
    let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
    format!(
        "Unknown scenario: '{name}'. Available: {}",
        available.join(", ")
    )
    .into()
}

/// Run a simulation from a mesh file or built-in scenario.
pub fn simulate(args: SimulateArgs) -> CliResult {
    println!("Wobble Simulation");
    println!("─────────────────");

    let (mesh, scenario_config) = match &args.mesh {
        Some(path) => {
            println!("Mesh:      {}", path.display());
            let source = std::fs::read_to_string(path)?;
            (parse_obj(&source)?, None)
        }
        None => {
            let kind = ScenarioKind::from_name(&args.scenario)
                .ok_or_else(|| unknown_scenario(&args.scenario))?;
            println!("Scenario:  {}", kind.name());
            let scenario = Scenario::from_kind(kind);
            (scenario.mesh, Some(scenario.config))
        }
    };

    let config = match &args.config {
        Some(path) => {
            println!("Config:    {}", path.display());
            load_config(path)?
        }
        None => scenario_config.unwrap_or_default(),
    };
    let dt = args.dt.unwrap_or(config.dt);
    let every = args.every.max(1);

    println!(
        "Body:      {} particles, {} faces, {} triangles",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.triangle_count()
    );
    println!("Steps:     up to {} at dt = {dt}s", args.steps);
    println!();

    let mut exporter = match &args.frames {
        Some(path) => {
            let mut exporter = JsonFrameExporter::new(path);
            exporter.init(&mesh)?;
            Some(exporter)
        }
        None => None,
    };

    let mut sim = Simulation::new(config)?;
    if args.trace_events {
        sim.events_mut()
            .add_sink(Box::new(TracingSink::new(Level::INFO)));
    }
    sim.load_polygon_mesh(mesh)?;
    sim.start();

    if let Some(exporter) = exporter.as_mut() {
        exporter.submit_frame(&RenderFrame::from_buffers(0, 0.0, sim.buffers()))?;
    }

    let mut settle_step = None;
    for _ in 0..args.steps {
        let outcome = sim.step(dt)?;
        if settle_step.is_none() && outcome.mode_after == ModeKind::Settling {
            settle_step = Some(outcome.step);
        }

        let finished = !sim.is_running();
        if let Some(exporter) = exporter.as_mut() {
            if outcome.step % every as u64 == 0 || finished {
                let frame = RenderFrame::from_buffers(outcome.step, sim.sim_time(), sim.buffers());
                exporter.submit_frame(&frame)?;
            }
        }
        if finished {
            break;
        }
    }
    sim.events_mut().finalize();

    println!("Steps run:     {}", sim.step_count());
    println!("Sim time:      {:.3}s", sim.sim_time());
    println!("Final mode:    {}", sim.mode_kind());
    match settle_step {
        Some(step) => println!("Settle began:  step {step}"),
        None => println!("Settle began:  never"),
    }
    println!("Final KE:      {:.6e}", sim.kinetic_energy());

    if let Some(mut exporter) = exporter {
        let frames = exporter.frame_count();
        exporter.finalize()?;
        if let Some(path) = &args.frames {
            println!("Frames:        {frames} written to {}", path.display());
        }
    }

    if let Some(path) = &args.snapshot {
        let snapshot = StateSnapshot::from_state(
            sim.step_count(),
            sim.sim_time(),
            sim.mode_kind().name(),
            sim.state(),
        );
        snapshot.write_to(path)?;
        println!("Snapshot:      {}", path.display());
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&Path>) -> CliResult {
    println!("Wobble Benchmark Suite");
    println!("══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        let kind =
            ScenarioKind::from_name(scenario_name).ok_or_else(|| unknown_scenario(scenario_name))?;
        vec![kind]
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);

        println!(
            "Running: {} ({} particles, {} tris, up to {} steps)",
            kind.name(),
            scenario.mesh.vertex_count(),
            scenario.mesh.triangle_count(),
            scenario.timesteps,
        );

        let metrics =
            BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!("  Final mode:    {}", metrics.final_mode);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {}", path.display());
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &Path) -> CliResult {
    println!("Wobble Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = StateSnapshot::read_from(path)?;
    let state = snapshot.to_state()?;

    println!("Step:         {}", snapshot.step);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Mode:         {}", snapshot.mode);
    println!("Particles:    {}", snapshot.particle_count);
    println!("Mass:         {}", snapshot.mass);
    println!("Kinetic E:    {:.6e}", state.kinetic_energy());

    if state.particle_count() > 0 {
        let max_y = state
            .positions
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max);
        let center = state.center();
        println!("Y range:      [{:.4}, {:.4}]", state.min_y(), max_y);
        println!(
            "Center:       [{:.4}, {:.4}, {:.4}]",
            center.x, center.y, center.z
        );
    }

    Ok(())
}

/// Validate a mesh or config.
pub fn validate(path: &Path) -> CliResult {
    println!("Wobble Validator");
    println!("────────────────");
    println!();

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match extension {
        "toml" => {
            println!("Validating config: {}", path.display());
            load_config(path)?;
            println!("✅ Config is valid.");
        }
        "obj" => {
            println!("Validating mesh: {}", path.display());
            let source = std::fs::read_to_string(path)?;
            match parse_obj(&source) {
                Ok(mesh) => report_mesh(&mesh),
                Err(e) => println!("❌ Mesh validation failed: {e}"),
            }
        }
        "json" => {
            println!("Validating mesh: {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let mesh: PolygonMesh = serde_json::from_str(&content)?;
            match mesh.validate() {
                Ok(()) => report_mesh(&mesh),
                Err(e) => println!("❌ Mesh validation failed: {e}"),
            }
        }
        _ => {
            println!("Unsupported file format. Use .toml (config), .obj or .json (mesh).");
        }
    }

    Ok(())
}

fn report_mesh(mesh: &PolygonMesh) {
    let topology = Topology::build(mesh);
    println!(
        "✅ Mesh is valid ({} verts, {} faces, {} tris, {} springs, {}).",
        mesh.vertex_count(),
        mesh.face_count(),
        topology.triangle_count(),
        topology.edges.len(),
        if topology.is_closed() {
            "closed"
        } else {
            "open"
        }
    );
}

/// Print a config preset as TOML.
pub fn config(preset: &str) -> CliResult {
    let config = match preset {
        "default" => SimulationConfig::default(),
        "weightless" => SimulationConfig::weightless(),
        "firm" => SimulationConfig::firm(),
        other => {
            return Err(format!(
                "Unknown preset: '{other}'. Available: default, weightless, firm"
            )
            .into())
        }
    };
    print!("{}", config.to_toml_string()?);
    Ok(())
}
