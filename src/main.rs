use swarmsim::{bench_tick, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless particle swarm runner")]
struct Args {
    /// Scenario file, looked up under `scenarios/` unless it is a path to an existing file
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the scenario's tick count
    #[arg(long)]
    ticks: Option<u64>,

    /// Run the tick benchmark instead of a scenario
    #[arg(long)]
    bench: bool,

    /// Ticks timed per (N, mode) pair in benchmark mode
    #[arg(long, default_value_t = 100)]
    bench_steps: usize,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("loading scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_tick(args.bench_steps);
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(ticks) = args.ticks {
        scenario_cfg.run.ticks = ticks;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg);
    let summary = scenario.run();

    info!(
        ticks = summary.ticks,
        simulated_time = summary.simulated_time,
        mean_distance = summary.stats.mean_distance,
        max_distance = summary.stats.max_distance,
        mean_speed = summary.stats.mean_speed,
        mode_changes = summary.mode_changes,
        resets = summary.resets,
        "run finished"
    );

    Ok(())
}
