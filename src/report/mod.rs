//! Report assembly.
//!
//! [`ReportAssembler`] runs the resolver pipeline over one registry and adds
//! the size totals: needed set and print order from the closure walks, the
//! queue-independent indexes, and detected cycles. The resulting
//! [`AssetReport`] can then be rendered as a flat list ([`AssetReport::entries`]).
//! Per-queue-entry trees come straight from the registry ([`build_tree`]).
//!
//! One assembler corresponds to one report run. Its [`SizeCache`] is shared
//! by every registry analysed with it and dropped with it.

pub mod entries;
pub mod size;
pub mod tree;

use serde::Serialize;

pub use entries::{EntryList, ReportEntry};
pub use size::{FsSizeResolver, SizeCache, SizeResolver};
pub use tree::{DependencyTree, NodeStatus, TreeNode, build_tree};

use crate::core::AssetKind;
use crate::registry::{Registry, Snapshot};
use crate::resolver::{
    ClosureResolver, Cycle, DependentsIndex, DuplicateGroups, NeededSet, PrintOrder,
    build_dependents, build_duplicate_groups, detect_cycles,
};

/// Timestamp format used when the snapshot does not carry one.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Analysis of one registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReport {
    pub kind: AssetKind,
    pub registered_count: usize,
    pub queued_count: usize,
    pub needed: NeededSet,
    pub print_order: PrintOrder,
    /// Sum of resolved sizes over needed items with a source
    pub total_size: u64,
    pub dependents: DependentsIndex,
    pub duplicate_groups: DuplicateGroups,
    pub cycles: Vec<Cycle>,
}

/// Runs the analysis pipeline with a per-run size cache.
#[derive(Debug)]
pub struct ReportAssembler<R> {
    sizes: SizeCache<R>,
}

impl<R: SizeResolver> ReportAssembler<R> {
    /// Create an assembler with an empty size cache.
    pub fn new(resolver: R) -> Self {
        Self {
            sizes: SizeCache::new(resolver),
        }
    }

    /// Analyse one registry.
    pub fn analyze(&mut self, registry: &Registry) -> AssetReport {
        let closure = ClosureResolver::new(registry).resolve(registry.queue());

        let total_size: u64 = closure
            .needed
            .iter()
            .filter_map(|name| registry.lookup(name))
            .filter(|item| item.has_source())
            .map(|item| self.sizes.size_of(&item.source).unwrap_or(0))
            .sum();

        let cycles = detect_cycles(registry, &closure.print_order);

        AssetReport {
            kind: registry.kind(),
            registered_count: registry.len(),
            queued_count: registry.queue().len(),
            needed: closure.needed,
            print_order: closure.print_order,
            total_size,
            dependents: build_dependents(registry),
            duplicate_groups: build_duplicate_groups(registry),
            cycles,
        }
    }

    /// List view of a report, sharing this run's size cache.
    pub fn entries(&mut self, report: &AssetReport, registry: &Registry) -> EntryList {
        report.entries(registry, &mut self.sizes)
    }

    /// Analyse and list every requested kind present in `snapshot`.
    pub fn full_report(&mut self, snapshot: &Snapshot, kinds: &[AssetKind]) -> FullReport {
        let mut full = FullReport {
            generated_at: snapshot
                .generated_at
                .clone()
                .unwrap_or_else(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()),
            site: snapshot.site.clone(),
            scripts: None,
            styles: None,
            modules: None,
        };

        for &kind in kinds {
            let Some(registry) = snapshot.registry(kind) else {
                tracing::debug!("Snapshot has no {} registry", kind);
                continue;
            };
            let report = self.analyze(&registry);
            let list = self.entries(&report, &registry);
            let section = Some(ReportSection {
                report,
                list,
            });
            match kind {
                AssetKind::Script => full.scripts = section,
                AssetKind::Style => full.styles = section,
                AssetKind::Module => full.modules = section,
            }
        }

        full
    }
}

/// One registry's analysis plus its list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    #[serde(flatten)]
    pub report: AssetReport,
    #[serde(flatten)]
    pub list: EntryList,
}

/// Every analysed registry of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullReport {
    pub generated_at: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<ReportSection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<ReportSection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<ReportSection>,
}

impl FullReport {
    /// Sections in display order.
    pub fn sections(&self) -> impl Iterator<Item = &ReportSection> {
        [&self.scripts, &self.styles, &self.modules].into_iter().flatten()
    }
}
