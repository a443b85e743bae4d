//! Benchmark runner: drives scenarios through the controller and collects
//! metrics.

use std::time::Instant;

use tracing::info;
use wobble_render::{HeadlessRenderer, RenderFrame, Renderer};
use wobble_sim::{ModeKind, Simulation};
use wobble_types::WobbleResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    ///
    /// The run ends after `scenario.timesteps` steps or as soon as the
    /// controller stops on its own (settling finished), whichever is first.
    pub fn run(scenario: &Scenario) -> WobbleResult<BenchmarkMetrics> {
        let mut sim = Simulation::new(scenario.config.clone())?;
        sim.load_polygon_mesh(scenario.mesh.clone())?;
        sim.start();

        let mut renderer = HeadlessRenderer::new();
        renderer.init(&scenario.mesh)?;

        let initial = sim.state().positions.clone();
        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);
        let mut settle_step = None;

        let total_start = Instant::now();

        for _ in 0..scenario.timesteps {
            let step_start = Instant::now();
            let outcome = sim.step(scenario.dt)?;
            renderer.submit_frame(&RenderFrame::from_buffers(
                outcome.step,
                sim.sim_time(),
                sim.buffers(),
            ))?;
            step_times.push(step_start.elapsed().as_secs_f64());

            if settle_step.is_none() && outcome.mode_after == ModeKind::Settling {
                settle_step = Some(outcome.step);
            }
            if !sim.is_running() {
                break;
            }
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        renderer.finalize()?;

        let max_displacement = sim
            .state()
            .positions
            .iter()
            .zip(&initial)
            .map(|(p, p0)| p.distance(*p0))
            .fold(0.0f32, f32::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().copied().fold(f64::MAX, f64::min)
        };
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            total_wall_time,
            timesteps: step_times.len() as u32,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            final_kinetic_energy: sim.kinetic_energy(),
            max_displacement,
            settle_step,
            final_mode: sim.mode_kind().name().to_string(),
            particle_count: sim.state().particle_count(),
            spring_count: sim.springs().len(),
            triangle_count: sim.topology().triangle_count(),
        };

        info!(
            scenario = %metrics.scenario,
            steps = metrics.timesteps,
            final_mode = %metrics.final_mode,
            "benchmark scenario finished"
        );

        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> WobbleResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
