//! `asset-report report`: stats and list view for each asset kind.
//!
//! ```text
//! JavaScript
//!   Registered      42  registered on this site
//!   Enqueued         3  requested by theme or plugins
//!   Scripts loaded   7  actually loaded (with dependencies)
//!   Size        118.4 KB
//!
//!   jquery #1 87.5 KB ENQUEUED DUPLICATE SRC
//!       ↳ /wp-includes/js/jquery/jquery.js (v3.7.1)
//!       Added by: core
//!       Same file as: jquery-core
//!       Used by: cart, slider
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fmt::Write as _;
use std::path::PathBuf;

use super::common::{CommandContext, OutputFormat, badge, selected_kinds};
use crate::core::AssetKind;
use crate::report::{FsSizeResolver, FullReport, ReportAssembler, ReportEntry, ReportSection};
use crate::utils::format_bytes;

/// Print stats and every loaded item.
#[derive(Args, Debug)]
pub struct ReportCommand {
    /// Snapshot file (JSON, TOML or YAML)
    snapshot: PathBuf,

    /// Only report these kinds (script, style, module); repeatable
    #[arg(short, long = "kind")]
    kinds: Vec<AssetKind>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Site root for size lookups (overrides root_dir from the config)
    #[arg(long)]
    root: Option<PathBuf>,
}

impl ReportCommand {
    /// Run the command.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let format = OutputFormat::parse(&self.format)?;
        let ctx = CommandContext::load(config_path, &self.snapshot).await?;

        let resolver = FsSizeResolver::from_config(&ctx.config, self.root.as_deref());
        let mut assembler = ReportAssembler::new(resolver);
        let full = assembler.full_report(&ctx.snapshot, &selected_kinds(&self.kinds));

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&full)?),
            OutputFormat::Text => print!("{}", render_report(&full)),
        }
        Ok(())
    }
}

/// Text rendering of a whole report.
pub fn render_report(full: &FullReport) -> String {
    let mut out = String::new();
    let _ = write!(out, "{} {}", "Asset report".bold(), full.generated_at.bright_black());
    if let Some(site) = &full.site {
        let _ = write!(out, " {}", site.bright_black());
    }
    out.push('\n');

    let mut any = false;
    for section in full.sections() {
        any = true;
        out.push('\n');
        render_section(&mut out, section);
    }
    if !any {
        out.push_str("\nNo registries found in snapshot.\n");
    }
    out
}

fn render_section(out: &mut String, section: &ReportSection) {
    let report = &section.report;
    let kind = report.kind;

    let _ = writeln!(out, "{}", kind.section_title().cyan().bold());
    let loaded_label = format!("{} loaded", kind.plural());
    let rows = [
        ("Registered", report.registered_count, "registered on this site"),
        ("Enqueued", report.queued_count, "requested by theme or plugins"),
        (loaded_label.as_str(), report.needed.len(), "actually loaded (with dependencies)"),
    ];
    for (label, count, meta) in rows {
        let _ = writeln!(out, "  {:<16}{:>5}  {}", label.bold(), count, meta.bright_black());
    }
    if report.total_size > 0 {
        let _ = writeln!(out, "  {:<16}{:>5}", "Size".bold(), format_bytes(report.total_size));
    }

    if section.list.entries.is_empty() {
        let _ = writeln!(out, "\n  No {} loaded.", kind.plural().to_lowercase());
    }
    for entry in &section.list.entries {
        out.push('\n');
        render_entry(out, entry);
    }

    if !section.list.missing.is_empty() {
        let _ = writeln!(
            out,
            "\n  {} {}",
            badge("MISSING"),
            section.list.missing.join(", ")
        );
    }
    for cycle in &report.cycles {
        let _ = writeln!(out, "\n  {} {}", badge("CIRCULAR"), cycle);
    }
}

fn render_entry(out: &mut String, entry: &ReportEntry) {
    let _ = write!(out, "  {}", entry.name.cyan().bold());
    if let Some(order) = entry.order {
        let _ = write!(out, " {}", format!("#{order}").bright_black());
    }
    if let Some(size) = entry.size {
        let _ = write!(out, " {}", format_bytes(size));
    }
    if entry.enqueued {
        let _ = write!(out, " {}", badge("ENQUEUED"));
    }
    if entry.footer {
        let _ = write!(out, " {}", badge("FOOTER"));
    }
    if let Some(bytes) = entry.inline_bytes {
        let _ = write!(out, " {}", badge(&format!("INLINE {}", format_bytes(bytes))));
    }
    if entry.duplicate_source {
        let _ = write!(out, " {}", badge("DUPLICATE SRC"));
    }
    out.push('\n');

    if !entry.source.is_empty() {
        let _ = write!(out, "      ↳ {}", entry.source);
        if let Some(version) = &entry.version {
            let _ = write!(out, "{}", format!(" (v{version})").bright_black());
        }
        out.push('\n');
    }

    let meta = [
        ("Added by", entry.added_by.iter().cloned().collect::<Vec<_>>()),
        ("Same file as", entry.same_file_as.clone()),
        ("Loaded because of", entry.loaded_because_of.clone()),
        ("Used by", entry.used_by.clone()),
    ];
    for (label, names) in meta {
        if !names.is_empty() {
            let _ = writeln!(out, "      {}: {}", label.bright_black(), names.join(", "));
        }
    }
}
