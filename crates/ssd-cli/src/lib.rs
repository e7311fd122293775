//! SSD CLI - command line tools for solution-space evaluation.
//!
//! Binaries:
//! - ssd: evaluate a snapshot file
//! - ssd_scenario: run a built-in encounter

pub mod config;
pub mod scenarios;

pub use config::Config;
pub use scenarios::{Scenario, ScenarioKind};

/// Install the fmt subscriber, honouring `RUST_LOG` on top of `default_directive`.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_directive.parse()?),
        )
        .try_init()?;
    Ok(())
}
