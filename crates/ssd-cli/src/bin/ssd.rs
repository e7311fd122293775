//! Evaluate solution spaces for a traffic snapshot file.
//!
//! Usage:
//!   ssd --input traffic.json --ownship MS848 --pretty

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ssd_cli::{init_tracing, Config};
use ssd_core::{evaluate_ownship, evaluate_snapshot, SolutionSpace, Snapshot};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solution-space-diagram evaluation for a traffic snapshot")]
struct Args {
    /// Snapshot JSON file
    #[arg(long)]
    input: PathBuf,

    /// Aircraft to evaluate as ownship (repeatable; default: every aircraft)
    #[arg(long)]
    ownship: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Write the result here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing("ssd=info")?;
    let args = Args::parse();
    let config = Config::from_env();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let snapshot = Snapshot::from_json(&raw)
        .with_context(|| format!("failed to parse snapshot {}", args.input.display()))?;
    tracing::info!(
        "Loaded {} aircraft from {}",
        snapshot.aircraft.len(),
        args.input.display()
    );

    let spaces: Vec<SolutionSpace> = if args.ownship.is_empty() {
        evaluate_snapshot(&snapshot, &config.settings)?
    } else {
        args.ownship
            .iter()
            .map(|id| evaluate_ownship(&snapshot, id, &config.settings))
            .collect::<Result<_, _>>()?
    };

    for space in &spaces {
        tracing::info!(
            "{}: max severity {:?}, {:.0}% free, current velocity {}",
            space.ownship_id,
            space.max_severity,
            space.free_fraction() * 100.0,
            if space.current_velocity_conflicting { "conflicting" } else { "clear" }
        );
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&spaces)?
    } else {
        serde_json::to_string(&spaces)?
    };

    match args.output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {} solution space(s) to {}", spaces.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
