//! Transitive closure and print order of the requested queue.
//!
//! Both walks start from each queue entry in queue order and follow declared
//! dependencies in declared order. A name is marked visited before its
//! children are explored; that marking alone breaks cycles, so a cyclic member
//! lands in the order once, at the point its first visit completes.
//!
//! Names absent from the registry are kept: they join the needed set and the
//! print order but expand to nothing.

use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};

use crate::registry::Registry;

/// Queue plus every name transitively required by it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeededSet(HashSet<String>);

impl NeededSet {
    /// Whether `name` is needed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of needed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Needed names in sorted order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().collect();
        names.sort_unstable();
        names
    }
}

impl Serialize for NeededSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

/// Needed names in dependency-first order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintOrder {
    order: Vec<String>,
    positions: HashMap<String, usize>,
}

impl PrintOrder {
    fn push(&mut self, name: &str) {
        self.positions.insert(name.to_string(), self.order.len());
        self.order.push(name.to_string());
    }

    /// Zero-based position of `name`, if it was emitted.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// The order as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    /// Number of emitted names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in print order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl Serialize for PrintOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

/// Both closure outputs of one queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    /// Queue plus transitive dependencies
    pub needed: NeededSet,
    /// Dependency-first order over the same names
    pub print_order: PrintOrder,
}

/// Walks a registry's dependency lists from a queue.
#[derive(Debug, Clone, Copy)]
pub struct ClosureResolver<'a> {
    registry: &'a Registry,
}

impl<'a> ClosureResolver<'a> {
    /// Create a resolver over `registry`.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
        }
    }

    /// Every name reachable from `queue`, queue included.
    #[must_use]
    pub fn needed(&self, queue: &'a [String]) -> NeededSet {
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut stack: Vec<&'a str> = Vec::new();

        for name in queue {
            if visited.insert(name.as_str()) {
                stack.push(name.as_str());
            }
            while let Some(current) = stack.pop() {
                for dep in self.registry.dependencies_of(current) {
                    if visited.insert(dep.as_str()) {
                        stack.push(dep.as_str());
                    }
                }
            }
        }

        NeededSet(visited.into_iter().map(str::to_string).collect())
    }

    /// Post-order walk: each name is emitted after all of its dependencies.
    #[must_use]
    pub fn print_order(&self, queue: &'a [String]) -> PrintOrder {
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut order = PrintOrder::default();
        // (name, index of the next dependency to visit)
        let mut stack: Vec<(&'a str, usize)> = Vec::new();

        for root in queue {
            if !visited.insert(root.as_str()) {
                continue;
            }
            stack.push((root.as_str(), 0));

            while let Some(frame) = stack.last_mut() {
                let deps = self.registry.dependencies_of(frame.0);
                if let Some(dep) = deps.get(frame.1) {
                    frame.1 += 1;
                    if visited.insert(dep.as_str()) {
                        stack.push((dep.as_str(), 0));
                    }
                } else {
                    order.push(frame.0);
                    stack.pop();
                }
            }
        }

        order
    }

    /// Needed set and print order together.
    #[must_use]
    pub fn resolve(&self, queue: &'a [String]) -> Closure {
        let needed = self.needed(queue);
        let print_order = self.print_order(queue);
        tracing::debug!(
            "{} closure: {} queued, {} needed, {} ordered",
            self.registry.kind(),
            queue.len(),
            needed.len(),
            print_order.len()
        );
        Closure {
            needed,
            print_order,
        }
    }
}

/// Queue plus transitive dependency closure.
#[must_use]
pub fn compute_needed(queue: &[String], registry: &Registry) -> NeededSet {
    ClosureResolver::new(registry).needed(queue)
}

/// Dependency-first order over the names reachable from `queue`.
#[must_use]
pub fn compute_print_order(queue: &[String], registry: &Registry) -> PrintOrder {
    ClosureResolver::new(registry).print_order(queue)
}
