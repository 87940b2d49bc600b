//! Tree view of a report: each queued item with its dependencies nested below.
//!
//! Unlike the closure walks, the tree repeats shared dependencies under every
//! parent that declares them, so its size can grow exponentially with the
//! graph. [`TraversalLimits`] caps the depth and total node count; capped
//! branches end in a [`NodeStatus::Truncated`] leaf.

use serde::Serialize;

use crate::registry::{Registry, Version};
use crate::resolver::TraversalLimits;

/// How a tree node relates to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Registered; children follow its declared dependencies
    Present,
    /// Declared as a dependency but never registered
    Missing,
    /// Already an ancestor on this path
    Circular,
    /// Not expanded because a traversal cap was reached
    Truncated,
}

/// One node of a dependency tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub status: NodeStatus,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub enqueued: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub footer: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_bytes: Option<u64>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(name: &str, status: NodeStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
            enqueued: false,
            footer: false,
            inline_bytes: None,
            source: String::new(),
            version: None,
            added_by: None,
            children: Vec::new(),
        }
    }

    /// This node plus all of its descendants.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// Trees for every queue entry of one registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DependencyTree {
    pub roots: Vec<TreeNode>,

    /// Whether any branch was cut short by the limits
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

struct TreeBuilder<'a> {
    registry: &'a Registry,
    limits: TraversalLimits,
    badges: bool,
    emitted: usize,
    truncated: bool,
    path: Vec<&'a str>,
}

impl<'a> TreeBuilder<'a> {
    fn node(&mut self, name: &'a str, depth: usize) -> TreeNode {
        if depth > self.limits.max_depth || self.emitted >= self.limits.max_nodes {
            self.truncated = true;
            return TreeNode::leaf(name, NodeStatus::Truncated);
        }
        self.emitted += 1;

        if self.path.contains(&name) {
            return TreeNode::leaf(name, NodeStatus::Circular);
        }
        let registry = self.registry;
        let Some(item) = registry.lookup(name) else {
            return TreeNode::leaf(name, NodeStatus::Missing);
        };

        self.path.push(name);
        let children = item.deps.iter().map(|dep| self.node(dep, depth + 1)).collect();
        self.path.pop();

        TreeNode {
            name: name.to_string(),
            status: NodeStatus::Present,
            enqueued: registry.is_queued(name),
            footer: self.badges && item.in_footer(),
            inline_bytes: if self.badges { item.inline_bytes() } else { None },
            source: item.source.clone(),
            version: item.version.clone(),
            added_by: item.added_by.clone(),
            children,
        }
    }
}

/// Expand every queue entry of `registry` into a tree.
#[must_use]
pub fn build_tree(registry: &Registry, limits: TraversalLimits) -> DependencyTree {
    let limits = limits.clamped();
    let mut builder = TreeBuilder {
        registry,
        limits,
        badges: registry.kind().has_script_badges(),
        emitted: 0,
        truncated: false,
        path: Vec::new(),
    };

    let roots = registry.queue().iter().map(|name| builder.node(name, 0)).collect();

    if builder.truncated {
        tracing::warn!(
            "{} dependency tree truncated (max depth {}, max nodes {})",
            registry.kind(),
            limits.max_depth,
            limits.max_nodes
        );
    }

    DependencyTree {
        roots,
        truncated: builder.truncated,
    }
}
