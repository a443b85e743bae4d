//! Per-scenario benchmark results and their CSV form.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Number of steps actually executed.
    pub timesteps: u32,
    /// Average wall-clock time per step (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Kinetic energy after the last step.
    pub final_kinetic_energy: f64,
    /// Maximum particle displacement from the initial position.
    pub max_displacement: f32,
    /// Step at which settling began, if it did.
    pub settle_step: Option<u64>,
    /// Mode when the run ended.
    pub final_mode: String,
    pub particle_count: usize,
    pub spring_count: usize,
    /// Triangles after fan triangulation.
    pub triangle_count: usize,
}

/// CSV columns, in row order.
const CSV_COLUMNS: [&str; 14] = [
    "scenario",
    "particle_count",
    "spring_count",
    "triangle_count",
    "timesteps",
    "total_wall_time_s",
    "avg_step_ms",
    "min_step_ms",
    "max_step_ms",
    "steps_per_s",
    "final_ke",
    "max_displacement",
    "settle_step",
    "final_mode",
];

impl BenchmarkMetrics {
    /// Simulated steps per wall-clock second, or 0 for an empty run.
    pub fn steps_per_second(&self) -> f64 {
        if self.total_wall_time > 0.0 {
            self.timesteps as f64 / self.total_wall_time
        } else {
            0.0
        }
    }

    pub fn to_csv_header() -> String {
        CSV_COLUMNS.join(",")
    }

    /// One CSV row. A run that never settled writes `-` for the settle step.
    pub fn to_csv_row(&self) -> String {
        let settle_step = match self.settle_step {
            Some(step) => step.to_string(),
            None => "-".to_string(),
        };
        let fields = [
            self.scenario.clone(),
            self.particle_count.to_string(),
            self.spring_count.to_string(),
            self.triangle_count.to_string(),
            self.timesteps.to_string(),
            format!("{:.6}", self.total_wall_time),
            format!("{:.4}", self.avg_step_time * 1000.0),
            format!("{:.4}", self.min_step_time * 1000.0),
            format!("{:.4}", self.max_step_time * 1000.0),
            format!("{:.1}", self.steps_per_second()),
            format!("{:.6e}", self.final_kinetic_energy),
            format!("{:.6}", self.max_displacement),
            settle_step,
            self.final_mode.clone(),
        ];
        fields.join(",")
    }

    /// Header plus one row per run, newline-separated.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        std::iter::once(Self::to_csv_header())
            .chain(metrics.iter().map(Self::to_csv_row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
