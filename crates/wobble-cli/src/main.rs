//! Wobble CLI: simulation, benchmarking, and inspection.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "wobble")]
#[command(version, about = "Wobble: mass-spring soft-body simulator")]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and optionally export frames and a final snapshot.
    Simulate {
        /// Mesh description file (.obj). Uses the built-in scenario when omitted.
        #[arg(short, long)]
        mesh: Option<PathBuf>,

        /// Built-in scenario used when no mesh is given.
        #[arg(long, default_value = "cube_drop")]
        scenario: String,

        /// Simulation config (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of steps.
        #[arg(short, long, default_value_t = 600)]
        steps: u32,

        /// Timestep in seconds. Defaults to the config's `dt`.
        #[arg(long)]
        dt: Option<f32>,

        /// Write render frames to this JSON file.
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Capture every n-th step when exporting frames.
        #[arg(long, default_value_t = 1)]
        every: u32,

        /// Write a binary state snapshot of the final step to this file.
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Log telemetry events through `tracing` (implies -v).
        #[arg(long)]
        trace_events: bool,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (cube_drop, slab_drop, sphere_drop, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: PathBuf,
    },

    /// Validate a mesh (.obj, .json) or config (.toml).
    Validate {
        /// Path to mesh or config file.
        path: PathBuf,
    },

    /// Print a config preset as TOML.
    Config {
        /// Preset name (default, weightless, firm).
        #[arg(short, long, default_value = "default")]
        preset: String,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let tracing_requested = matches!(
        cli.command,
        Commands::Simulate {
            trace_events: true,
            ..
        }
    );
    init_logging(if tracing_requested {
        cli.verbose.max(1)
    } else {
        cli.verbose
    });

    let result = match cli.command {
        Commands::Simulate {
            mesh,
            scenario,
            config,
            steps,
            dt,
            frames,
            every,
            snapshot,
            trace_events,
        } => commands::simulate(commands::SimulateArgs {
            mesh,
            scenario,
            config,
            steps,
            dt,
            frames,
            every,
            snapshot,
            trace_events,
        }),
        Commands::Benchmark { scenario, output } => {
            commands::benchmark(&scenario, output.as_deref())
        }
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Config { preset } => commands::config(&preset),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
