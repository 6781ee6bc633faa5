//! Weighted group assignment.
//!
//! A [`GroupAssigner`] is built once from a [`GroupDefinition`] and then only
//! read. Each lookup hashes the composed seed, keeps the last two decimal
//! digits as a bucket in `0..100`, and walks the cumulative thresholds.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, HashError};
use crate::group::{Group, GroupDefinition};
use crate::hasher::{Fnv1a, SeedHasher};

/// Sum of weights a complete definition covers.
pub const FULL_WEIGHT: u64 = 100;

/// Separator placed between the id and each extra seed component.
pub const SEED_SEPARATOR: char = '_';

/// Something that maps an identifier to a group.
pub trait Grouper {
    /// Group type handed back to callers.
    type Group;

    /// Resolve the group for `id`, optionally salted with `extra_seeds`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when the hash cannot be reduced to a bucket.
    fn get_group(
        &self,
        id: &str,
        extra_seeds: &[&str],
    ) -> Result<Option<&Self::Group>, HashError>;
}

/// One entry of the normalized, cumulative distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threshold {
    name: String,
    upper: u32,
}

impl Threshold {
    /// Name of the group this threshold selects.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exclusive upper bound: buckets below it (and above the previous one)
    /// select this group.
    #[must_use]
    pub fn upper(&self) -> u32 {
        self.upper
    }
}

/// Immutable, validated assignment table.
pub struct GroupAssigner<G> {
    thresholds: Vec<Threshold>,
    by_name: HashMap<String, usize>,
    groups: Vec<G>,
    default_group: Option<G>,
    total_weight: u64,
    hasher: Arc<dyn SeedHasher>,
}

impl<G: Group> GroupAssigner<G> {
    /// Build an assigner using the default [`Fnv1a`] hasher.
    ///
    /// # Errors
    ///
    /// See [`GroupAssigner::with_hasher`].
    pub fn new(definition: GroupDefinition<G>) -> Result<Self, ConfigError> {
        Self::with_hasher(definition, Some(Arc::new(Fnv1a)))
    }

    /// Build an assigner that hashes seeds with `hasher`.
    ///
    /// The hasher belongs to this assigner alone, so assigners built with
    /// different hashers never affect each other.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyGroups`] if the definition has no groups.
    /// - [`ConfigError::MissingHasher`] if `hasher` is `None`.
    /// - [`ConfigError::TotalExceeds`] if the weights sum past 100.
    /// - [`ConfigError::DefaultRequired`] if they sum below 100 without a
    ///   default group.
    pub fn with_hasher(
        definition: GroupDefinition<G>,
        hasher: Option<Arc<dyn SeedHasher>>,
    ) -> Result<Self, ConfigError> {
        let GroupDefinition {
            groups,
            default_group,
        } = definition;

        if groups.is_empty() {
            return Err(ConfigError::EmptyGroups);
        }
        let hasher = hasher.ok_or(ConfigError::MissingHasher)?;

        // Later duplicates overwrite earlier ones.
        let by_name: HashMap<String, usize> = groups
            .iter()
            .enumerate()
            .map(|(index, group)| (group.name().to_string(), index))
            .collect();

        let mut order: Vec<usize> = (0..groups.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&groups[a], &groups[b]);
            a.weight()
                .cmp(&b.weight())
                .then_with(|| a.name().cmp(b.name()))
        });

        let total_weight: u64 = groups.iter().map(|g| u64::from(g.weight())).sum();
        if total_weight > FULL_WEIGHT {
            return Err(ConfigError::TotalExceeds {
                total: total_weight,
            });
        }
        if total_weight < FULL_WEIGHT && default_group.is_none() {
            return Err(ConfigError::DefaultRequired {
                total: total_weight,
            });
        }

        // Every weight is at most 100 here, so the running sum fits.
        let mut running = 0u32;
        let thresholds = order
            .into_iter()
            .map(|index| {
                let group = &groups[index];
                running += group.weight();
                Threshold {
                    name: group.name().to_string(),
                    upper: running,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            groups = groups.len(),
            total_weight,
            has_default = default_group.is_some(),
            "group assigner built"
        );

        Ok(Self {
            thresholds,
            by_name,
            groups,
            default_group,
            total_weight,
            hasher,
        })
    }

    /// Resolve the group for `id`.
    ///
    /// The seed is `id` followed by `_component` for each extra seed. The
    /// returned group is the caller's original object. `None` is only
    /// possible if no group matches and no default exists, which a
    /// successfully built assigner rules out.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::TooShort`] if the hash has a single decimal digit.
    pub fn get_group(&self, id: &str, extra_seeds: &[&str]) -> Result<Option<&G>, HashError> {
        let seed = compose_seed(id, extra_seeds);
        let bucket = bucket_of(self.hasher.hash(&seed))?;
        let group = self.group_for_bucket(bucket);

        tracing::trace!(
            seed = %seed,
            bucket,
            group = group.map(Group::name),
            "group resolved"
        );

        Ok(group)
    }

    /// Group selected by an already-computed bucket.
    #[must_use]
    pub fn group_for_bucket(&self, bucket: u32) -> Option<&G> {
        self.thresholds
            .iter()
            .find(|threshold| bucket < threshold.upper)
            .and_then(|threshold| self.by_name.get(&threshold.name))
            .map(|&index| &self.groups[index])
            .or(self.default_group.as_ref())
    }

    /// Cumulative thresholds in lookup order.
    #[must_use]
    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    /// Fallback group, if configured.
    #[must_use]
    pub fn default_group(&self) -> Option<&G> {
        self.default_group.as_ref()
    }

    /// Groups as originally supplied, in definition order.
    #[must_use]
    pub fn groups(&self) -> &[G] {
        &self.groups
    }

    /// Raw sum of the configured weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Number of configured groups, excluding the default.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always `false` for a built assigner.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<G: Group> Grouper for GroupAssigner<G> {
    type Group = G;

    fn get_group(&self, id: &str, extra_seeds: &[&str]) -> Result<Option<&G>, HashError> {
        GroupAssigner::get_group(self, id, extra_seeds)
    }
}

impl<G: fmt::Debug> fmt::Debug for GroupAssigner<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupAssigner")
            .field("thresholds", &self.thresholds)
            .field("groups", &self.groups)
            .field("default_group", &self.default_group)
            .field("total_weight", &self.total_weight)
            .finish_non_exhaustive()
    }
}

/// Join `id` and the extra seed components with `_`.
#[must_use]
pub fn compose_seed(id: &str, extra_seeds: &[&str]) -> String {
    let extra_len: usize = extra_seeds.iter().map(|s| s.len() + 1).sum();
    let mut seed = String::with_capacity(id.len() + extra_len);
    seed.push_str(id);
    for component in extra_seeds {
        seed.push(SEED_SEPARATOR);
        seed.push_str(component);
    }
    seed
}

/// Reduce a hash to its last two decimal digits.
///
/// # Errors
///
/// Returns [`HashError::TooShort`] when `hash` has only one decimal digit.
pub fn bucket_of(hash: u32) -> Result<u32, HashError> {
    if hash < 10 {
        return Err(HashError::TooShort { hash });
    }
    Ok(hash % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::WeightedGroup;

    fn fixed(value: u32) -> Option<Arc<dyn SeedHasher>> {
        Some(Arc::new(move |_: &str| value))
    }

    #[test]
    fn test_bucket_keeps_last_two_digits() {
        assert_eq!(bucket_of(12345), Ok(45));
        assert_eq!(bucket_of(10), Ok(10));
        assert_eq!(bucket_of(100), Ok(0));
        assert_eq!(bucket_of(u32::MAX), Ok(95));
    }

    #[test]
    fn test_bucket_rejects_single_digit() {
        assert_eq!(bucket_of(7), Err(HashError::TooShort { hash: 7 }));
        assert_eq!(bucket_of(0), Err(HashError::TooShort { hash: 0 }));
    }

    #[test]
    fn test_compose_seed() {
        assert_eq!(compose_seed("id01", &[]), "id01");
        assert_eq!(compose_seed("id01", &["more01"]), "id01_more01");
        assert_eq!(compose_seed("u", &["a", "b"]), "u_a_b");
    }

    #[test]
    fn test_boundary_bucket_goes_to_next_group() {
        let definition = GroupDefinition::new(vec![
            WeightedGroup::new("A", 30),
            WeightedGroup::new("B", 70),
        ]);
        let assigner = GroupAssigner::with_hasher(definition, fixed(30)).unwrap();

        let group = assigner.get_group("any", &[]).unwrap().unwrap();
        assert_eq!(group.name, "B");
        assert_eq!(assigner.group_for_bucket(29).unwrap().name, "A");
    }

    #[test]
    fn test_zero_weight_group_is_never_selected() {
        let definition = GroupDefinition::new(vec![
            WeightedGroup::new("off", 0),
            WeightedGroup::new("on", 100),
        ]);
        let assigner = GroupAssigner::new(definition).unwrap();

        for bucket in 0..100 {
            assert_eq!(assigner.group_for_bucket(bucket).unwrap().name, "on");
        }
    }

    #[test]
    fn test_duplicate_names_resolve_to_last_definition() {
        let definition = GroupDefinition::new(vec![
            WeightedGroup::new("dup", 40),
            WeightedGroup::new("dup", 60),
        ]);
        let assigner = GroupAssigner::new(definition).unwrap();

        assert_eq!(assigner.group_for_bucket(0).unwrap().weight, 60);
        assert_eq!(assigner.group_for_bucket(99).unwrap().weight, 60);
    }
}
