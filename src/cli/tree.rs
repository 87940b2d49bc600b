//! `asset-report tree`: dependency trees below each queued item.
//!
//! Shared dependencies are repeated under every parent that declares them,
//! so the output shows exactly which chain brings each file in:
//!
//! ```text
//! JavaScript
//! ├── cart v1.2 /plugins/shop/cart.js ENQUEUED FOOTER
//! │   ├── jquery v3.7.1 /wp-includes/js/jquery.js (added by core)
//! │   └── shop-utils /plugins/shop/utils.js
//! │       └── jquery v3.7.1 /wp-includes/js/jquery.js (added by core)
//! └── slider /theme/slider.js ENQUEUED
//!     └── swiper MISSING
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use super::common::{CommandContext, OutputFormat, badge, selected_kinds};
use crate::core::AssetKind;
use crate::report::{DependencyTree, NodeStatus, TreeNode, build_tree};
use crate::resolver::MAX_TREE_DEPTH;
use crate::utils::format_bytes;

/// Print dependency trees.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Snapshot file (JSON, TOML or YAML)
    snapshot: PathBuf,

    /// Only show these kinds (script, style, module); repeatable
    #[arg(short, long = "kind")]
    kinds: Vec<AssetKind>,

    /// Maximum depth below each queued item (overrides max_depth from the config)
    #[arg(short, long)]
    depth: Option<usize>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

impl TreeCommand {
    /// Run the command.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let format = self.validate_arguments()?;
        let ctx = CommandContext::load(config_path, &self.snapshot).await?;

        let mut limits = ctx.config.limits();
        if let Some(depth) = self.depth {
            limits.max_depth = depth;
        }

        let mut trees: BTreeMap<AssetKind, DependencyTree> = BTreeMap::new();
        for kind in selected_kinds(&self.kinds) {
            if let Some(registry) = ctx.snapshot.registry(kind) {
                trees.insert(kind, build_tree(&registry, limits));
            }
        }

        match format {
            OutputFormat::Json => {
                let by_name: BTreeMap<String, &DependencyTree> =
                    trees.iter().map(|(kind, tree)| (kind.plural().to_lowercase(), tree)).collect();
                println!("{}", serde_json::to_string_pretty(&by_name)?);
            }
            OutputFormat::Text => print!("{}", render_trees(&trees)),
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<OutputFormat> {
        let format = OutputFormat::parse(&self.format)?;
        if self.depth == Some(0) {
            return Err(anyhow::anyhow!("Depth must be at least 1"));
        }
        if self.depth.is_some_and(|depth| depth > MAX_TREE_DEPTH) {
            return Err(anyhow::anyhow!("Depth must be at most {MAX_TREE_DEPTH}"));
        }
        Ok(format)
    }
}

/// Text rendering of every tree, one block per kind.
pub fn render_trees(trees: &BTreeMap<AssetKind, DependencyTree>) -> String {
    let mut out = String::new();
    if trees.is_empty() {
        out.push_str("No registries found in snapshot.\n");
        return out;
    }

    for (i, (kind, tree)) in trees.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", kind.section_title().cyan().bold());
        if tree.roots.is_empty() {
            let _ = writeln!(out, "No {} loaded.", kind.plural().to_lowercase());
            continue;
        }
        for (j, root) in tree.roots.iter().enumerate() {
            print_node(&mut out, root, "", j == tree.roots.len() - 1);
        }
        if tree.truncated {
            let _ = writeln!(
                out,
                "{}",
                "(…) = not expanded, depth or node limit reached".bright_black()
            );
        }
    }
    out
}

fn print_node(out: &mut String, node: &TreeNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    let _ = write!(out, "{prefix}{connector}{}", node.name.cyan());

    match node.status {
        NodeStatus::Missing => {
            let _ = write!(out, " {}", badge("MISSING"));
        }
        NodeStatus::Circular => {
            let _ = write!(out, " {}", badge("CIRCULAR"));
        }
        NodeStatus::Truncated => {
            let _ = write!(out, " {}", "(…)".bright_black());
        }
        NodeStatus::Present => {
            if let Some(version) = &node.version {
                let _ = write!(out, " {}", format!("v{version}").bright_black());
            }
            if !node.source.is_empty() {
                let _ = write!(out, " {}", node.source.bright_black());
            }
            if node.enqueued {
                let _ = write!(out, " {}", badge("ENQUEUED"));
            }
            if node.footer {
                let _ = write!(out, " {}", badge("FOOTER"));
            }
            if let Some(bytes) = node.inline_bytes {
                let _ = write!(out, " {}", badge(&format!("INLINE {}", format_bytes(bytes))));
            }
            if let Some(added_by) = &node.added_by {
                let _ = write!(out, " {}", format!("(added by {added_by})").bright_black());
            }
        }
    }
    out.push('\n');

    let child_prefix = if is_last { format!("{prefix}    ") } else { format!("{prefix}│   ") };
    for (i, child) in node.children.iter().enumerate() {
        print_node(out, child, &child_prefix, i == node.children.len() - 1);
    }
}
