//! Named experiments, each backed by its own [`GroupAssigner`].

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assigner::GroupAssigner;
use crate::error::RegistryError;
use crate::group::WeightedGroup;
use crate::hasher::{Fnv1a, SeedHasher};
use crate::settings::GroupingSettings;

/// Assigners keyed by experiment name.
///
/// The experiment name is appended to every id as an extra seed, so the same
/// user can land in different groups across experiments.
#[derive(Debug, Default)]
pub struct ExperimentRegistry {
    experiments: BTreeMap<String, GroupAssigner<WeightedGroup>>,
}

impl ExperimentRegistry {
    /// Build every experiment in `settings` with the default hasher.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Invalid`] for the first experiment whose
    /// definition is rejected.
    pub fn from_settings(settings: &GroupingSettings) -> Result<Self, RegistryError> {
        Self::from_settings_with_hasher(settings, &(Arc::new(Fnv1a) as Arc<dyn SeedHasher>))
    }

    /// Build every experiment in `settings`, all sharing `hasher`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Invalid`] for the first experiment whose
    /// definition is rejected.
    pub fn from_settings_with_hasher(
        settings: &GroupingSettings,
        hasher: &Arc<dyn SeedHasher>,
    ) -> Result<Self, RegistryError> {
        let mut experiments = BTreeMap::new();
        for (name, experiment) in &settings.experiments {
            let assigner =
                GroupAssigner::with_hasher(experiment.to_definition(), Some(Arc::clone(hasher)))
                    .map_err(|source| {
                        tracing::warn!(
                            experiment = %name,
                            error = %source,
                            "rejected experiment definition"
                        );
                        RegistryError::Invalid {
                            experiment: name.clone(),
                            source,
                        }
                    })?;
            experiments.insert(name.clone(), assigner);
        }
        Ok(Self { experiments })
    }

    /// Register an already-built assigner under `name`, replacing any
    /// previous one.
    pub fn insert(&mut self, name: impl Into<String>, assigner: GroupAssigner<WeightedGroup>) {
        self.experiments.insert(name.into(), assigner);
    }

    /// Assign `id` within `experiment`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownExperiment`] if no such experiment exists.
    /// - [`RegistryError::Hash`] if the hash cannot be reduced to a bucket.
    pub fn assign(
        &self,
        experiment: &str,
        id: &str,
    ) -> Result<Option<&WeightedGroup>, RegistryError> {
        let assigner = self.get(experiment)?;
        Ok(assigner.get_group(id, &[experiment])?)
    }

    /// Assigner for `experiment`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownExperiment`] if it is not registered.
    pub fn get(&self, experiment: &str) -> Result<&GroupAssigner<WeightedGroup>, RegistryError> {
        self.experiments
            .get(experiment)
            .ok_or_else(|| RegistryError::UnknownExperiment(experiment.to_string()))
    }

    /// Experiment names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.experiments.keys().map(String::as_str)
    }

    /// Experiments and their assigners in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupAssigner<WeightedGroup>)> {
        self.experiments
            .iter()
            .map(|(name, assigner)| (name.as_str(), assigner))
    }

    /// Number of registered experiments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}
