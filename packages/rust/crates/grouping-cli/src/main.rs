//! grouping CLI: assign ids to experiment groups from a YAML settings file.
//!
//! Settings come from `--config <path>`, else `GROUPING_CONFIG`, else
//! `grouping.yaml`.
//!
//! Logging: set `RUST_LOG=grouping=debug` to see assignment logs on stderr.

mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grouping::{ExperimentRegistry, GroupingSettings, SETTINGS_PATH_ENV, resolve_settings_path};

use crate::cli::{Cli, Command};
use crate::commands::{run_assign, run_hash, run_list, run_simulate};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "grouping=debug"
        } else {
            "grouping=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let registry = if cli.command.needs_settings() {
        let env_path = std::env::var(SETTINGS_PATH_ENV).ok();
        let path = resolve_settings_path(cli.config.clone(), env_path.as_deref());
        let settings = GroupingSettings::load(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        ExperimentRegistry::from_settings(&settings)?
    } else {
        ExperimentRegistry::default()
    };

    let output = match cli.command {
        Command::Assign { experiment, ids } => run_assign(&registry, &experiment, &ids)?,
        Command::Hash { seed } => run_hash(&seed),
        Command::Simulate {
            experiment,
            samples,
        } => run_simulate(&registry, &experiment, samples)?,
        Command::List => run_list(&registry),
    };
    print!("{output}");
    Ok(())
}
