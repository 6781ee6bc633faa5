use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "grouping")]
#[command(about = "Deterministic weighted group assignment for experiments and feature flags.")]
pub(crate) struct Cli {
    /// Settings file (else `GROUPING_CONFIG`, else grouping.yaml).
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print the group for each id within an experiment.
    Assign {
        /// Experiment name from the settings file.
        experiment: String,

        /// Identifiers to assign.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print the FNV-1a hash and bucket of a raw seed.
    Hash {
        /// Seed string, already composed (e.g. `user-001_welcome_content_test`).
        seed: String,
    },
    /// Assign synthetic ids and report the observed share per group.
    Simulate {
        /// Experiment name from the settings file.
        experiment: String,

        /// Number of synthetic ids (`user-0` .. `user-N`).
        #[arg(long, default_value_t = 10_000)]
        samples: u32,
    },
    /// List experiments with their cumulative thresholds.
    List,
}

impl Command {
    /// Whether the command needs the settings file.
    pub(crate) fn needs_settings(&self) -> bool {
        !matches!(self, Command::Hash { .. })
    }
}
