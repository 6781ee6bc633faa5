//! Experiment settings loaded from YAML.
//!
//! ```yaml
//! experiments:
//!   welcome_content_test:
//!     groups:
//!       - { name: group-A, weight: 20 }
//!     default: group-default
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::group::{GroupDefinition, WeightedGroup};

/// Settings file used when nothing else is configured.
pub const DEFAULT_SETTINGS_PATH: &str = "grouping.yaml";

/// Environment variable that overrides the settings path.
pub const SETTINGS_PATH_ENV: &str = "GROUPING_CONFIG";

/// Every experiment known to the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupingSettings {
    /// Experiments keyed by name.
    #[serde(default)]
    pub experiments: BTreeMap<String, ExperimentSettings>,
}

/// One experiment's groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentSettings {
    /// Weighted groups.
    #[serde(default)]
    pub groups: Vec<WeightedGroup>,
    /// Name of the fallback group.
    #[serde(default)]
    pub default: Option<String>,
}

impl ExperimentSettings {
    /// Turn this entry into a definition the assigner accepts.
    #[must_use]
    pub fn to_definition(&self) -> GroupDefinition<WeightedGroup> {
        GroupDefinition {
            groups: self.groups.clone(),
            default_group: self.default.as_deref().map(WeightedGroup::fallback),
        }
    }
}

impl GroupingSettings {
    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed YAML or unknown keys.
    pub fn from_yaml_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Read and parse a settings file.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::NotFound`] if `path` does not exist.
    /// - [`SettingsError::Io`] if it cannot be read.
    /// - [`SettingsError::Parse`] if it is not valid settings YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            experiments = settings.experiments.len(),
            "loaded grouping settings"
        );
        Ok(settings)
    }
}

/// Pick the settings path: explicit argument, then the value of
/// `GROUPING_CONFIG` (passed in by the caller), then
/// [`DEFAULT_SETTINGS_PATH`]. A blank environment value counts as unset.
#[must_use]
pub fn resolve_settings_path(explicit: Option<PathBuf>, env_value: Option<&str>) -> PathBuf {
    explicit
        .or_else(|| {
            env_value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_becomes_zero_weight_group() {
        let experiment = ExperimentSettings {
            groups: vec![WeightedGroup::new("A", 20)],
            default: Some("rest".to_string()),
        };
        let definition = experiment.to_definition();
        assert_eq!(definition.groups.len(), 1);
        assert_eq!(
            definition.default_group,
            Some(WeightedGroup::new("rest", 0))
        );
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_settings_path(Some(PathBuf::from("custom.yaml")), Some("env.yaml"));
        assert_eq!(path, PathBuf::from("custom.yaml"));
    }

    #[test]
    fn test_env_value_used_without_explicit_path() {
        let path = resolve_settings_path(None, Some("  env.yaml "));
        assert_eq!(path, PathBuf::from("env.yaml"));
    }

    #[test]
    fn test_blank_env_value_ignored() {
        assert_eq!(
            resolve_settings_path(None, Some("   ")),
            PathBuf::from(DEFAULT_SETTINGS_PATH)
        );
        assert_eq!(
            resolve_settings_path(None, Some("")),
            PathBuf::from(DEFAULT_SETTINGS_PATH)
        );
    }

    #[test]
    fn test_falls_back_to_default_path() {
        let path = resolve_settings_path(None, None);
        assert_eq!(path, PathBuf::from("grouping.yaml"));
    }
}
