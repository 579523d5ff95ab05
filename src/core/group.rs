//! Identifiers for monitoring well filters and their model layers.

use std::collections::BTreeMap;
use std::fmt;

/// One monitoring well filter: a location plus the filter number within it.
///
/// Ordering is by location first, then filter number, so ordered maps keyed
/// by `GroupKey` list the filters of a location together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub location: String,
    pub filter: i32,
}

impl GroupKey {
    pub fn new(location: impl Into<String>, filter: i32) -> Self {
        Self {
            location: location.into(),
            filter,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} filter {}", self.location, self.filter)
    }
}

/// Static mapping from filter to model layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerAssignment {
    layers: BTreeMap<GroupKey, i32>,
}

impl LayerAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a layer; a later assignment for the same key replaces the earlier one.
    pub fn assign(&mut self, key: GroupKey, layer: i32) {
        self.layers.insert(key, layer);
    }

    pub fn layer(&self, key: &GroupKey) -> Option<i32> {
        self.layers.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, i32)> {
        self.layers.iter().map(|(k, &l)| (k, l))
    }
}

impl FromIterator<(GroupKey, i32)> for LayerAssignment {
    fn from_iter<I: IntoIterator<Item = (GroupKey, i32)>>(iter: I) -> Self {
        let mut assignment = LayerAssignment::new();
        for (key, layer) in iter {
            assignment.assign(key, layer);
        }
        assignment
    }
}
