//! Why is this item loaded?
//!
//! A needed item that nobody requested directly was pulled in by some queued
//! item further up the dependents graph. The walk goes upward through the
//! [`DependentsIndex`] and stops at queued names, which are their own root
//! cause. A single visited set spans the whole walk, so cycles in the reverse
//! graph are entered once and then contribute nothing.
//!
//! [`enqueued_ancestor_map`] answers the same question for every name at once
//! by walking downward from each queued name instead, which keeps the list
//! view linear in the graph size for a short queue.
//!
//! An empty result means the registry gives no traceable path back to the
//! queue. Callers show that as "unknown"; it is not an error.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use super::reverse_index::DependentsIndex;
use crate::registry::Registry;

/// Answers provenance questions for one queue and one dependents index.
#[derive(Debug)]
pub struct ProvenanceResolver<'a> {
    queued: HashSet<&'a str>,
    index: &'a DependentsIndex,
}

impl<'a> ProvenanceResolver<'a> {
    /// Create a resolver for `queue` over `index`.
    #[must_use]
    pub fn new(queue: &'a [String], index: &'a DependentsIndex) -> Self {
        Self {
            queued: queue.iter().map(String::as_str).collect(),
            index,
        }
    }

    /// Queued names that transitively caused `name` to load.
    ///
    /// A queued `name` is its own cause, whatever depends on it.
    #[must_use]
    pub fn enqueued_ancestors(&self, name: &str) -> BTreeSet<String> {
        let mut ancestors = BTreeSet::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![name];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if self.queued.contains(current) {
                ancestors.insert(current.to_string());
                continue;
            }
            for dependent in self.index.dependents_of(current) {
                stack.push(dependent);
            }
        }

        ancestors
    }

    /// Dependency chains from each queued ancestor down to `name`.
    ///
    /// Each chain starts at a queued name and ends at `name`, following the
    /// shortest path through the dependents graph. Chains are sorted by their
    /// starting name. A queued `name` yields the single chain `[name]`.
    #[must_use]
    pub fn chains(&self, name: &str) -> Vec<Vec<String>> {
        // parent[n] = the name one step closer to `name`
        let mut parent: HashMap<&str, &str> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([name]);
        let mut frontier: VecDeque<&str> = VecDeque::from([name]);
        let mut roots: Vec<&str> = Vec::new();

        while let Some(current) = frontier.pop_front() {
            if self.queued.contains(current) {
                roots.push(current);
                continue;
            }
            for dependent in self.index.dependents_of(current) {
                if visited.insert(dependent) {
                    parent.insert(dependent, current);
                    frontier.push_back(dependent);
                }
            }
        }

        roots.sort_unstable();
        roots
            .into_iter()
            .map(|root| {
                let mut chain = vec![root.to_string()];
                let mut cursor = root;
                while let Some(&next) = parent.get(cursor) {
                    chain.push(next.to_string());
                    cursor = next;
                }
                chain
            })
            .collect()
    }
}

/// Queued names that transitively caused `name` to load.
#[must_use]
pub fn find_enqueued_ancestors(
    name: &str,
    queue: &[String],
    dependents: &DependentsIndex,
) -> BTreeSet<String> {
    ProvenanceResolver::new(queue, dependents).enqueued_ancestors(name)
}

/// Queued ancestors of every non-queued name reachable from the queue.
///
/// Walks the dependencies of each queued name, stopping at other queued
/// names, and records the root against everything it reaches. The result for
/// a name equals [`ProvenanceResolver::enqueued_ancestors`]; names with no
/// traceable root and queued names are absent from the map.
#[must_use]
pub fn enqueued_ancestor_map(registry: &Registry) -> HashMap<&str, BTreeSet<&str>> {
    let mut ancestors: HashMap<&str, BTreeSet<&str>> = HashMap::new();

    for root in registry.queue() {
        let mut visited: HashSet<&str> = HashSet::from([root.as_str()]);
        let mut stack: Vec<&str> = vec![root.as_str()];

        while let Some(current) = stack.pop() {
            for dep in registry.dependencies_of(current) {
                let dep = dep.as_str();
                if registry.is_queued(dep) || !visited.insert(dep) {
                    continue;
                }
                ancestors.entry(dep).or_default().insert(root.as_str());
                stack.push(dep);
            }
        }
    }

    ancestors
}
