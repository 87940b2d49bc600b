//! `asset-report why`: explain why one item is loaded.
//!
//! For each selected kind that knows the name, prints whether it is loaded,
//! the queued items that pulled it in, and one shortest chain from each of
//! them down to the item.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fmt::Write as _;
use std::path::PathBuf;

use super::common::{CommandContext, badge, selected_kinds};
use crate::core::{AssetKind, ReportError};
use crate::registry::{Registry, Snapshot};
use crate::resolver::{ProvenanceResolver, build_dependents, compute_needed};
use crate::utils::find_similar;

/// Explain why an item is loaded.
#[derive(Args, Debug)]
pub struct WhyCommand {
    /// Snapshot file (JSON, TOML or YAML)
    snapshot: PathBuf,

    /// Item name to explain
    name: String,

    /// Only look in these kinds (script, style, module); repeatable
    #[arg(short, long = "kind")]
    kinds: Vec<AssetKind>,
}

impl WhyCommand {
    /// Run the command.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let ctx = CommandContext::load(config_path, &self.snapshot).await?;
        let text = explain(&ctx.snapshot, &self.name, &selected_kinds(&self.kinds))?;
        print!("{text}");
        Ok(())
    }
}

/// Provenance text for `name` across `kinds`.
///
/// Fails with suggestions when no selected registry registers, queues or
/// depends on `name`.
pub fn explain(snapshot: &Snapshot, name: &str, kinds: &[AssetKind]) -> Result<String, ReportError> {
    let registries: Vec<Registry> = kinds.iter().filter_map(|&kind| snapshot.registry(kind)).collect();

    let mut out = String::new();
    let mut found = false;
    for registry in &registries {
        if explain_in(&mut out, registry, name) {
            found = true;
        }
    }

    if found {
        return Ok(out);
    }

    let candidates = registries.iter().flat_map(Registry::names);
    let kind = match kinds {
        [single] => single.to_string(),
        _ => "asset".to_string(),
    };
    Err(ReportError::ItemNotFound {
        name: name.to_string(),
        kind,
        suggestions: find_similar(name, candidates),
    })
}

fn explain_in(out: &mut String, registry: &Registry, name: &str) -> bool {
    let needed = compute_needed(registry.queue(), registry);
    let dependents = build_dependents(registry);

    let registered = registry.contains(name);
    let is_needed = needed.contains(name);
    if !registered && !is_needed && dependents.get(name).is_none() {
        return false;
    }

    if !out.is_empty() {
        out.push('\n');
    }
    let _ = write!(out, "{} {}", name.cyan().bold(), format!("({})", registry.kind()).bright_black());
    if !registered {
        let _ = write!(out, " {}", badge("MISSING"));
    }
    out.push('\n');

    if registry.is_queued(name) {
        let _ = writeln!(out, "  {} requested directly", badge("ENQUEUED"));
        return true;
    }
    if !is_needed {
        let _ = writeln!(out, "  Not loaded on this page");
        return true;
    }

    let provenance = ProvenanceResolver::new(registry.queue(), &dependents);
    let chains = provenance.chains(name);
    if chains.is_empty() {
        let _ = writeln!(out, "  {}: {}", "Loaded because of".bright_black(), "unknown".yellow());
        return true;
    }

    let roots: Vec<&str> = chains.iter().map(|chain| chain[0].as_str()).collect();
    let _ = writeln!(out, "  {}: {}", "Loaded because of".bright_black(), roots.join(", "));
    for chain in &chains {
        let _ = writeln!(out, "    {}", chain.join(" → "));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Item, RegistrySnapshot};

    fn snapshot() -> Snapshot {
        let mut scripts = RegistrySnapshot::default();
        for (name, deps) in [
            ("jquery", vec![]),
            ("utils", vec!["jquery"]),
            ("cart", vec!["utils", "ghost"]),
            ("slider", vec!["jquery"]),
            ("idle", vec!["jquery"]),
        ] {
            scripts.registered.insert(name.to_string(), Item::new(format!("/{name}.js")).with_deps(deps));
        }
        scripts.queue = vec!["cart".to_string(), "slider".to_string()];

        let mut styles = RegistrySnapshot::default();
        styles.registered.insert("jquery".to_string(), Item::new("/jquery-ui.css"));

        Snapshot {
            scripts: Some(scripts),
            styles: Some(styles),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_explain_dependency() {
        colored::control::set_override(false);
        let text = explain(&snapshot(), "jquery", &[AssetKind::Script]).unwrap();
        assert_eq!(
            text,
            "jquery (script)\n  Loaded because of: cart, slider\n    cart → utils → jquery\n    slider → jquery\n"
        );
    }

    #[test]
    fn test_explain_across_kinds() {
        colored::control::set_override(false);
        let text = explain(&snapshot(), "jquery", AssetKind::all()).unwrap();
        assert!(text.contains("jquery (script)"));
        assert!(text.contains("jquery (style)\n  Not loaded on this page"));
    }

    #[test]
    fn test_explain_queued_and_missing() {
        colored::control::set_override(false);
        let text = explain(&snapshot(), "cart", &[AssetKind::Script]).unwrap();
        assert!(text.contains("ENQUEUED requested directly"));

        let text = explain(&snapshot(), "ghost", &[AssetKind::Script]).unwrap();
        assert!(text.starts_with("ghost (script) MISSING"));
        assert!(text.contains("cart → ghost"));
    }

    #[test]
    fn test_unknown_name_suggests() {
        let err = explain(&snapshot(), "jqeury", &[AssetKind::Script]).unwrap_err();
        match err {
            ReportError::ItemNotFound {
                name,
                kind,
                suggestions,
            } => {
                assert_eq!(name, "jqeury");
                assert_eq!(kind, "script");
                assert_eq!(suggestions, ["jquery"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
