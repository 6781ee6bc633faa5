//! Group model and group definitions.

use serde::{Deserialize, Serialize};

/// A named bucket with a percentage weight.
///
/// The assigner reads groups but never writes to them; the cumulative
/// weights it needs live in its own threshold list.
pub trait Group {
    /// Identity of the group. Expected to be unique within a definition.
    fn name(&self) -> &str;

    /// Configured share, in whole percent.
    fn weight(&self) -> u32;
}

impl<G: Group + ?Sized> Group for &G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn weight(&self) -> u32 {
        (**self).weight()
    }
}

/// Plain group record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedGroup {
    /// Group name.
    pub name: String,
    /// Share in whole percent.
    #[serde(default)]
    pub weight: u32,
}

impl WeightedGroup {
    /// Create a group with the given name and weight.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// A zero-weight group, used as a fallback.
    #[must_use]
    pub fn fallback(name: impl Into<String>) -> Self {
        Self::new(name, 0)
    }
}

impl Group for WeightedGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> u32 {
        self.weight
    }
}

/// Input to [`crate::GroupAssigner`]: ordered groups plus an optional fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDefinition<G> {
    /// Groups to distribute identifiers over.
    pub groups: Vec<G>,
    /// Returned when a bucket lands past every group's threshold.
    pub default_group: Option<G>,
}

impl<G> GroupDefinition<G> {
    /// Definition with no fallback group.
    #[must_use]
    pub fn new(groups: Vec<G>) -> Self {
        Self {
            groups,
            default_group: None,
        }
    }

    /// Set the fallback group.
    #[must_use]
    pub fn with_default(mut self, default_group: G) -> Self {
        self.default_group = Some(default_group);
        self
    }
}

impl<G> Default for GroupDefinition<G> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
