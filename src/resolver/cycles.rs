//! Cycle detection among needed items.
//!
//! The closure walks break cycles silently. This module surfaces them as a
//! separate signal so reports can flag them, using strongly-connected
//! components of the needed subgraph.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

use super::closure::PrintOrder;
use crate::registry::Registry;

/// A set of needed items that depend on each other in a loop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Cycle {
    /// Members in sorted order
    pub members: Vec<String>,
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.members.join(" ↔ "))
    }
}

/// Find every dependency cycle among the names in `order`.
///
/// A component counts as a cycle when it has more than one member or a
/// member depends on itself. Cycles are returned sorted.
#[must_use]
pub fn detect_cycles(registry: &Registry, order: &PrintOrder) -> Vec<Cycle> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::with_capacity(order.len());

    for name in order.iter() {
        nodes.insert(name, graph.add_node(name));
    }
    for name in order.iter() {
        let from = nodes[name];
        for dep in registry.dependencies_of(name) {
            if let Some(&to) = nodes.get(dep.as_str())
                && !graph.contains_edge(from, to)
            {
                graph.add_edge(from, to, ());
            }
        }
    }

    let mut cycles: Vec<Cycle> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || graph.contains_edge(component[0], component[0])
        })
        .map(|component| {
            let mut members: Vec<String> =
                component.into_iter().map(|idx| graph[idx].to_string()).collect();
            members.sort();
            Cycle {
                members,
            }
        })
        .collect();
    cycles.sort();

    for cycle in &cycles {
        tracing::warn!("Circular {} dependency: {}", registry.kind(), cycle);
    }

    cycles
}
