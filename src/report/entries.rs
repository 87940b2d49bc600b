//! Flat list view of a report: one entry per loaded item.

use serde::Serialize;
use std::collections::BTreeSet;

use super::AssetReport;
use super::size::{SizeCache, SizeResolver};
use crate::registry::{Registry, Version};
use crate::resolver::enqueued_ancestor_map;

/// Everything the list view shows about one needed item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub name: String,

    /// 1-based position in print order
    pub order: Option<usize>,

    /// File size, when the source resolves to a local file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    pub enqueued: bool,

    /// Printed in the page footer (scripts only)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub footer: bool,

    /// Size of the attached inline payload (scripts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_bytes: Option<u64>,

    /// Source shared with another registered item
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub duplicate_source: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,

    /// Other items registered with the same file
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_file_as: Vec<String>,

    /// Queued items that pulled this one in; empty for queued items
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub loaded_because_of: Vec<String>,

    /// Needed items that depend on this one directly
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub used_by: Vec<String>,
}

/// List view of one registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryList {
    /// Registered needed items, sorted by name
    pub entries: Vec<ReportEntry>,

    /// Needed names that were never registered, sorted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl AssetReport {
    /// Build the list view for `registry`.
    ///
    /// `registry` must be the one this report was analysed from.
    pub fn entries<R: SizeResolver>(&self, registry: &Registry, sizes: &mut SizeCache<R>) -> EntryList {
        let provenance = enqueued_ancestor_map(registry);
        let badges = self.kind.has_script_badges();
        let mut list = EntryList::default();

        for name in self.needed.sorted() {
            let Some(item) = registry.lookup(name) else {
                list.missing.push(name.to_string());
                continue;
            };

            let enqueued = registry.is_queued(name);
            let loaded_because_of = if enqueued {
                Vec::new()
            } else {
                provenance
                    .get(name)
                    .map(|roots| roots.iter().map(|root| (*root).to_string()).collect())
                    .unwrap_or_default()
            };
            let used_by: BTreeSet<&str> =
                self.dependents.dependents_of(name).filter(|d| self.needed.contains(d)).collect();

            list.entries.push(ReportEntry {
                name: name.to_string(),
                order: self.print_order.position(name).map(|idx| idx + 1),
                size: sizes.size_of(&item.source),
                enqueued,
                footer: badges && item.in_footer(),
                inline_bytes: if badges { item.inline_bytes() } else { None },
                duplicate_source: self.duplicate_groups.is_duplicate(&item.source),
                source: item.source.clone(),
                version: item.version.clone(),
                added_by: item.added_by.clone(),
                same_file_as: self
                    .duplicate_groups
                    .others(name, &item.source)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                loaded_because_of,
                used_by: used_by.into_iter().map(str::to_string).collect(),
            });
        }

        list
    }
}
