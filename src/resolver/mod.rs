//! Dependency-graph analysis over a [`Registry`](crate::registry::Registry).
//!
//! Everything here is pure computation over an owned registry copy:
//!
//! - [`closure`] - the needed set (queue plus transitive deps) and the print
//!   order (dependencies before dependents)
//! - [`reverse_index`] - who depends on whom, and which items share a file
//! - [`provenance`] - which queued items caused a non-queued item to load
//! - [`cycles`] - strongly-connected components among needed items
//!
//! None of these fail on graph data. Dangling names are carried along as
//! plain names, and cycles are broken by visited marking so every traversal
//! terminates. Each traversal keeps its worklist on the heap, so arbitrarily
//! deep chains are fine.
//!
//! # Example
//!
//! ```rust
//! use asset_report::core::AssetKind;
//! use asset_report::registry::{Item, RegistryBuilder};
//! use asset_report::resolver::{
//!     build_dependents, compute_needed, compute_print_order, find_enqueued_ancestors,
//! };
//!
//! let mut builder = RegistryBuilder::new(AssetKind::Script);
//! builder.register("A", Item::new("a.js"), None);
//! builder.register("B", Item::new("b.js").with_deps(["A"]), None);
//! builder.register("C", Item::new("c.js").with_deps(["B"]), None);
//! builder.enqueue("C");
//! let registry = builder.build();
//!
//! let needed = compute_needed(registry.queue(), &registry);
//! assert_eq!(needed.len(), 3);
//!
//! let order = compute_print_order(registry.queue(), &registry);
//! assert_eq!(order.as_slice(), ["A", "B", "C"]);
//!
//! let dependents = build_dependents(&registry);
//! let ancestors = find_enqueued_ancestors("A", registry.queue(), &dependents);
//! assert_eq!(ancestors.into_iter().collect::<Vec<_>>(), ["C"]);
//! ```

pub mod closure;
pub mod cycles;
pub mod provenance;
pub mod reverse_index;

pub use closure::{Closure, ClosureResolver, NeededSet, PrintOrder, compute_needed, compute_print_order};
pub use cycles::{Cycle, detect_cycles};
pub use provenance::{ProvenanceResolver, enqueued_ancestor_map, find_enqueued_ancestors};
pub use reverse_index::{
    DependentsIndex, DuplicateGroups, build_dependents, build_duplicate_groups, normalize_source,
};

use serde::{Deserialize, Serialize};

/// Default maximum depth of an expanded dependency tree.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum number of nodes in an expanded dependency tree.
pub const DEFAULT_MAX_NODES: usize = 5000;

/// Hard ceiling for [`TraversalLimits::max_depth`].
///
/// Tree nodes are built, rendered and serialized recursively, so depth must
/// stay well inside the call stack whatever the configuration says.
pub const MAX_TREE_DEPTH: usize = 256;

/// Hard ceiling for [`TraversalLimits::max_nodes`].
pub const MAX_TREE_NODES: usize = 100_000;

/// Caps for traversals that may visit the same name more than once.
///
/// The closure, print order and provenance walks expand every name at most
/// once and need no caps. The tree view repeats shared subtrees on every path
/// that reaches them, which grows exponentially on dense graphs; these caps
/// bound it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalLimits {
    /// Deepest level expanded below a queue entry
    pub max_depth: usize,
    /// Total nodes emitted per tree
    pub max_nodes: usize,
}

impl TraversalLimits {
    /// These limits with each cap lowered to its hard ceiling.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            max_depth: self.max_depth.min(MAX_TREE_DEPTH),
            max_nodes: self.max_nodes.min(MAX_TREE_NODES),
        }
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}
