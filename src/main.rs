use dispersim::{Scenario, ScenarioConfig};
use dispersim::{advance_simulation, view_direction};
use dispersim::{bench_classifier, bench_packing, bench_collisions_curve};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "figure.yaml")]
    file_name: String,

    /// Run the benchmark suite instead of a scenario
    #[arg(long)]
    bench: bool,

    /// Per-tick debug logging
    #[arg(short, long)]
    verbose: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)?;
    Ok(scenario_cfg)
}

/// Headless frame loop: fire scheduled shots, advance, log once per second
fn run(mut scenario: Scenario) {
    let Scenario { world, viewpoint, shots } = &mut scenario;
    let h0 = world.parameters.h0;
    let t_end = world.parameters.t_end;

    let mut next_shot = 0;
    let mut next_report = 0.0;

    while world.t < t_end {
        while next_shot < shots.len() && shots[next_shot].at <= world.t {
            let shot = &shots[next_shot];
            let dir = view_direction(shot.h_angle, shot.v_angle);
            match world.select_target(viewpoint, &dir) {
                Some(i) => info!(body = i, t = world.t, "shot hit"),
                None => info!(t = world.t, "shot missed"),
            }
            next_shot += 1;
        }

        let dt = advance_simulation(world, h0, viewpoint);

        if world.t >= next_report {
            let summary = world.frame_summary();
            info!(
                t = summary.t,
                spheres = summary.spheres,
                billboards = summary.billboards,
                states = ?summary.lifecycles,
                "frame"
            );
            next_report += 1.0;
        }

        if world.viewer_reached(viewpoint) {
            info!(t = world.t, "a body reached the viewer, stopping");
            break;
        }
        if dt <= 0.0 {
            break;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if args.bench {
        bench_classifier()?;
        bench_packing()?;
        bench_collisions_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;
    run(scenario);

    Ok(())
}
