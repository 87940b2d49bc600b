//! Queue-independent indexes over the whole registry.
//!
//! - [`DependentsIndex`]: reverse adjacency, name -> names that declare it
//! - [`DuplicateGroups`]: normalized source -> names sharing that file
//!
//! Both are built from every registered item, needed or not, so the same
//! registry always yields the same indexes whatever the queue holds.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::registry::Registry;

/// Strip the query string from a source locator.
///
/// `"shared.js?ver=2"` and `"shared.js?ver=3"` both normalize to `"shared.js"`.
#[must_use]
pub fn normalize_source(source: &str) -> &str {
    source.split_once('?').map_or(source, |(path, _)| path)
}

/// Reverse dependency map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependentsIndex(BTreeMap<String, BTreeSet<String>>);

impl DependentsIndex {
    /// Names that list `name` as a dependency.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.0.get(name)
    }

    /// Iterate over the direct dependents of `name`.
    pub fn dependents_of<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.0.get(name).into_iter().flatten().map(String::as_str)
    }

    /// Number of names with at least one dependent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no item declares any dependency.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, dependents)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }
}

/// Items that resolve to the same physical file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DuplicateGroups(BTreeMap<String, BTreeSet<String>>);

impl DuplicateGroups {
    /// The group sharing `source` (normalized before lookup).
    #[must_use]
    pub fn group_for(&self, source: &str) -> Option<&BTreeSet<String>> {
        let normalized = normalize_source(source);
        if normalized.is_empty() {
            return None;
        }
        self.0.get(normalized)
    }

    /// Whether `source` is shared with at least one other item.
    #[must_use]
    pub fn is_duplicate(&self, source: &str) -> bool {
        self.group_for(source).is_some()
    }

    /// The other members of `name`'s group.
    #[must_use]
    pub fn others<'a>(&'a self, name: &str, source: &str) -> Vec<&'a str> {
        self.group_for(source)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|member| *member != name)
            .collect()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no file is shared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(normalized source, members)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }
}

/// Build the reverse dependency map over every registered item.
#[must_use]
pub fn build_dependents(registry: &Registry) -> DependentsIndex {
    let mut dependents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (name, item) in registry.items() {
        for dep in &item.deps {
            dependents.entry(dep.clone()).or_default().insert(name.clone());
        }
    }
    DependentsIndex(dependents)
}

/// Group registered items by normalized source, keeping groups of two or more.
///
/// Items without a source are skipped.
#[must_use]
pub fn build_duplicate_groups(registry: &Registry) -> DuplicateGroups {
    let mut by_source: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (name, item) in registry.items() {
        let normalized = normalize_source(&item.source);
        if normalized.is_empty() {
            continue;
        }
        by_source.entry(normalized.to_string()).or_default().insert(name.clone());
    }
    by_source.retain(|_, names| names.len() > 1);

    if !by_source.is_empty() {
        tracing::debug!("{} duplicate source group(s) in {} registry", by_source.len(), registry.kind());
    }

    DuplicateGroups(by_source)
}
