#![allow(clippy::doc_markdown)]

//! grouping - Deterministic A/B/N bucketing
//!
//! Assigns an identifier to one of several weighted groups. The same id (and
//! the same extra seeds, typically an experiment name) always lands in the
//! same group, with no stored state.
//!
//! # Architecture
//!
//! ```text
//! grouping/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── error.rs     # ConfigError, HashError, SettingsError, RegistryError
//! ├── hasher.rs    # SeedHasher trait, FNV-1a default
//! ├── group.rs     # Group trait, WeightedGroup, GroupDefinition
//! ├── assigner.rs  # GroupAssigner: validation, cumulative thresholds, lookup
//! ├── settings.rs  # YAML experiment settings
//! └── registry.rs  # ExperimentRegistry: one assigner per experiment
//! ```
//!
//! # Example
//!
//! ```rust
//! use grouping::{GroupAssigner, GroupDefinition, WeightedGroup};
//!
//! let definition = GroupDefinition::new(vec![WeightedGroup::new("group-A", 20)])
//!     .with_default(WeightedGroup::fallback("group-default"));
//! let assigner = GroupAssigner::new(definition)?;
//!
//! let group = assigner.get_group("user-001", &["welcome_content_test"])?;
//! assert_eq!(group.map(|g| g.name.as_str()), Some("group-A"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod assigner;
mod error;
mod group;
mod hasher;
mod registry;
mod settings;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use assigner::{
    FULL_WEIGHT, GroupAssigner, Grouper, SEED_SEPARATOR, Threshold, bucket_of, compose_seed,
};
pub use error::{ConfigError, HashError, RegistryError, SettingsError};
pub use group::{Group, GroupDefinition, WeightedGroup};
pub use hasher::{FNV_OFFSET_BASIS, FNV_PRIME, Fnv1a, SeedHasher, fnv1a_32};
pub use registry::ExperimentRegistry;
pub use settings::{
    DEFAULT_SETTINGS_PATH, ExperimentSettings, GroupingSettings, SETTINGS_PATH_ENV,
    resolve_settings_path,
};
