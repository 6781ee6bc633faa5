//! Error types for group assignment.
//!
//! Library errors are explicit `thiserror` enums; callers decide how to
//! report them.

use std::path::PathBuf;

use thiserror::Error;

/// Rejection of a group definition at construction time.
///
/// Construction is atomic: when one of these is returned no assigner exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The definition has no groups.
    #[error("elements required")]
    EmptyGroups,

    /// An explicit hasher was requested but none was supplied.
    #[error("hash function required")]
    MissingHasher,

    /// The weights add up to more than 100.
    #[error("total ratio exceeds 100 (got {total})")]
    TotalExceeds {
        /// Raw sum of all configured weights.
        total: u64,
    },

    /// The weights add up to less than 100 and there is nothing to fall back to.
    #[error("default element required when total < 100 (got {total})")]
    DefaultRequired {
        /// Raw sum of all configured weights.
        total: u64,
    },
}

/// Failure while turning a hash into a bucket.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The decimal form of the hash has fewer than two digits.
    #[error("hash value too short: {hash}")]
    TooShort {
        /// The offending hash value.
        hash: u32,
    },
}

/// Failure while loading experiment settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file does not exist.
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Low-level I/O error while reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid settings YAML.
    #[error("failed to parse settings yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Failure in the experiment registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// One experiment carries an invalid group definition.
    #[error("experiment `{experiment}` is invalid: {source}")]
    Invalid {
        /// Name of the rejected experiment.
        experiment: String,
        /// Why its definition was rejected.
        #[source]
        source: ConfigError,
    },

    /// No experiment with this name is registered.
    #[error("unknown experiment: {0}")]
    UnknownExperiment(String),

    /// Lookup failed inside the experiment's assigner.
    #[error(transparent)]
    Hash(#[from] HashError),
}
