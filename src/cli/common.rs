//! Pieces shared by the CLI commands: loading inputs, kind selection and
//! output formats.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use std::path::{Path, PathBuf};

use crate::config::ReportConfig;
use crate::core::{AssetKind, ReportError};
use crate::registry::Snapshot;

/// Output formats accepted by `--format`.
pub const VALID_FORMATS: &[&str] = &["text", "json"];

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value.
    pub fn parse(format: &str) -> Result<Self, ReportError> {
        match format {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ReportError::UnsupportedFormat {
                format: other.to_string(),
                valid: VALID_FORMATS.join(", "),
            }),
        }
    }
}

/// Config and snapshot for one command run.
#[derive(Debug)]
pub struct CommandContext {
    pub config: ReportConfig,
    pub snapshot: Snapshot,
}

impl CommandContext {
    /// Load the config (following the lookup order) and then the snapshot.
    pub async fn load(config_path: Option<PathBuf>, snapshot_path: &Path) -> Result<Self> {
        let config = ReportConfig::load_with_optional(config_path).await?;
        let snapshot = Snapshot::load(snapshot_path).await?;
        Ok(Self {
            config,
            snapshot,
        })
    }
}

/// Kinds named with `--kind`, deduplicated in canonical order; all kinds when
/// none were named.
#[must_use]
pub fn selected_kinds(requested: &[AssetKind]) -> Vec<AssetKind> {
    AssetKind::all()
        .iter()
        .copied()
        .filter(|kind| requested.is_empty() || requested.contains(kind))
        .collect()
}

/// Badge text as printed in text output.
pub fn badge(label: &str) -> ColoredString {
    match label {
        "ENQUEUED" => label.green().bold(),
        "FOOTER" => label.blue(),
        "DUPLICATE SRC" | "MISSING" => label.red().bold(),
        "CIRCULAR" => label.yellow().bold(),
        _ => label.magenta(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        let err = OutputFormat::parse("yaml").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported format 'yaml'. Valid formats are: text, json");
    }

    #[test]
    fn test_selected_kinds() {
        assert_eq!(selected_kinds(&[]), AssetKind::all());
        assert_eq!(
            selected_kinds(&[AssetKind::Module, AssetKind::Script, AssetKind::Module]),
            [AssetKind::Script, AssetKind::Module]
        );
    }
}
