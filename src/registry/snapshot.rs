//! Snapshot files exported by the host runtime.
//!
//! A snapshot captures every registry of one request: scripts, styles and
//! modules, each with its registered items and queue. Any section may be
//! absent. The format is chosen from the file extension.
//!
//! ```toml
//! site = "https://example.test/shop/"
//!
//! [scripts]
//! queue = ["app"]
//!
//! [scripts.registered.app]
//! src = "/js/app.js?ver=2"
//! deps = ["jquery"]
//! added_by = "plugin: shop"
//!
//! [scripts.registered.jquery]
//! src = "/js/jquery.js"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

use super::{Item, Registry};
use crate::core::{AssetKind, ReportError};

/// One registry section as it appears in a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Explicitly requested names
    #[serde(default)]
    pub queue: Vec<String>,

    /// All registered items by name
    #[serde(default)]
    pub registered: BTreeMap<String, Item>,
}

impl RegistrySnapshot {
    /// Take a private registry copy for analysis.
    #[must_use]
    pub fn to_registry(&self, kind: AssetKind) -> Registry {
        Registry::new(kind, self.registered.clone(), self.queue.clone())
    }
}

/// All registries captured for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the host captured the registries, if it said so
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    /// Page or site the snapshot was taken on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,

    /// Script registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<RegistrySnapshot>,

    /// Stylesheet registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<RegistrySnapshot>,

    /// Script module registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<RegistrySnapshot>,
}

/// Encodings a snapshot can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `.json`, also the fallback for unknown extensions
    Json,
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => SnapshotFormat::Toml,
            Some("yaml" | "yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

impl Snapshot {
    /// Read and decode a snapshot file.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::SnapshotNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;

        let snapshot = Self::parse(&content, SnapshotFormat::from_path(path)).map_err(|e| {
            ReportError::SnapshotParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(
            "Loaded snapshot {} ({} script, {} style, {} module items)",
            path.display(),
            snapshot.section(AssetKind::Script).map_or(0, |s| s.registered.len()),
            snapshot.section(AssetKind::Style).map_or(0, |s| s.registered.len()),
            snapshot.section(AssetKind::Module).map_or(0, |s| s.registered.len()),
        );

        Ok(snapshot)
    }

    /// Decode snapshot content in the given format.
    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self, ReportError> {
        let snapshot: Self = match format {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Toml => toml::from_str(content)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(snapshot)
    }

    /// The section for `kind`, if the host exported one.
    #[must_use]
    pub const fn section(&self, kind: AssetKind) -> Option<&RegistrySnapshot> {
        match kind {
            AssetKind::Script => self.scripts.as_ref(),
            AssetKind::Style => self.styles.as_ref(),
            AssetKind::Module => self.modules.as_ref(),
        }
    }

    /// Registry copy for `kind`, if present.
    #[must_use]
    pub fn registry(&self, kind: AssetKind) -> Option<Registry> {
        self.section(kind).map(|section| section.to_registry(kind))
    }
}
