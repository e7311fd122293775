//! Run a built-in encounter and print the resulting solution space.
//!
//! Usage:
//!   ssd_scenario --scenario crossing --json

use anyhow::Result;
use clap::Parser;
use ssd_cli::scenarios::OWNSHIP_ID;
use ssd_cli::{init_tracing, Config, Scenario, ScenarioKind};
use ssd_core::{evaluate_ownship, TrafficOverview};

#[derive(Parser, Debug)]
#[command(author, version, about = "Built-in solution-space scenarios")]
struct Args {
    #[arg(long, value_enum, default_value = "head-on")]
    scenario: ScenarioKind,

    /// Also dump the solution space and traffic overview as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing("ssd=info")?;
    let args = Args::parse();
    let scenario = Scenario::build(args.scenario, Config::from_env().settings);

    println!("Scenario: {}", scenario.name);
    let space = evaluate_ownship(&scenario.snapshot, OWNSHIP_ID, &scenario.settings)?;

    for pair in &space.conflicts {
        println!(
            "  {:<8} {:<20} severity={:<8} tcpa={:>8.1}s dcpa={:>8.0}m tlos={:>8.1}s closing={} blocks={}",
            pair.intruder_id,
            format!("{:?}", pair.status),
            format!("{:?}", pair.severity),
            pair.metrics.tcpa_s,
            pair.metrics.dcpa_m,
            pair.metrics.tlos_s,
            pair.metrics.is_closing(),
            pair.blocks_current_velocity
        );
    }
    println!(
        "Ownship {}: max severity {:?}, free {:.1}% of annulus{}",
        space.ownship_id,
        space.max_severity,
        space.free_fraction() * 100.0,
        if space.is_boxed_in() { " (boxed in)" } else { "" }
    );

    if args.json {
        let overview = TrafficOverview::from_snapshot(&scenario.snapshot);
        let dump = serde_json::json!({ "solution_space": space, "overview": overview });
        println!("{}", serde_json::to_string_pretty(&dump)?);
    }
    Ok(())
}
