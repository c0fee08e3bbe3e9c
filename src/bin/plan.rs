//! CLI demo harness (§4.M): loads a scenario (and optionally a config) from
//! JSON, runs one planning call, and prints the result. Not a control-loop
//! integration -- it never talks to ROS or a vehicle bus.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use frenet_planner::planner::PlanRequest;
use frenet_planner::telemetry::LoggingObserver;
use frenet_planner::{PlannerConfig, Planner};

#[derive(Parser)]
#[command(name = "plan")]
#[command(about = "Run one Frenet planning call against a JSON scenario")]
struct Cli {
    /// Path to a scenario JSON file (waypoints, start state, obstacles, ...)
    #[arg(long)]
    scenario: PathBuf,

    /// Optional path to a PlannerConfig JSON file; defaults to
    /// `PlannerConfig::default()` when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let scenario_raw = fs::read_to_string(&cli.scenario)?;
    let request: PlanRequest = serde_json::from_str(&scenario_raw)?;

    let config = match cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        }
        None => PlannerConfig::default(),
    };

    let planner = Planner::new(config);
    let mut observer = LoggingObserver::default();

    match planner.plan(&request, Some(&mut observer)).await? {
        Some(path) => {
            println!("trajectory found: {} ticks, lane_id={}", path.num_ticks(), path.lane_id);
            println!(
                "  end state: d={:.3} v={:.3} T={:.3}",
                path.end.d, path.end.v, path.end.t
            );
            println!(
                "  cost: fix={:.4} hur={:.4} dyn={:.4} final={:.4}",
                path.fix_cost, path.hur_cost, path.dyn_cost, path.final_cost
            );
        }
        None => {
            println!("no feasible trajectory");
        }
    }

    Ok(())
}
