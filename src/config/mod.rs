//! Configuration for asset-report.
//!
//! The config file only tells the tool how to turn source locators into local
//! files (for size lookups) and how far to expand dependency trees. All keys
//! are optional.
//!
//! ```toml
//! # asset-report.toml
//! root_dir = "/var/www/html"
//! content_url = "https://example.test/wp-content"
//! content_dir = "/var/www/html/wp-content"
//! includes_url = "https://example.test/wp-includes/"
//! includes_dir = "/var/www/html/wp-includes"
//! max_depth = 64
//! max_tree_nodes = 5000
//! ```
//!
//! # Lookup order
//!
//! 1. The path given with `--config`
//! 2. The `ASSET_REPORT_CONFIG` environment variable
//! 3. `asset-report.toml` in the current directory
//! 4. Built-in defaults
//!
//! Directory values go through `shellexpand` (`~` and `$VARS`), and relative
//! directories are resolved against the directory holding the config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::ReportError;
use crate::resolver::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, MAX_TREE_DEPTH, MAX_TREE_NODES, TraversalLimits,
};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "ASSET_REPORT_CONFIG";

/// Config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "asset-report.toml";

/// Settings for size resolution and tree expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Site root; relative locators and unmatched URL paths resolve here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,

    /// URL prefix of the content directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,

    /// Local directory behind `content_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_dir: Option<PathBuf>,

    /// URL prefix of the bundled includes directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes_url: Option<String>,

    /// Local directory behind `includes_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes_dir: Option<PathBuf>,

    /// Deepest tree level expanded below a queue entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Most nodes emitted per tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tree_nodes: Option<usize>,
}

impl ReportConfig {
    /// Load configuration following the lookup order.
    ///
    /// An explicitly named file (flag or environment) must exist; the
    /// current-directory file is optional.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let explicit = path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ReportError::ConfigError {
                    message: format!("config file {} does not exist", path.display()),
                }
                .into());
            }
            return Self::load_from(&path).await;
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            Self::load_from(&local).await
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate a specific config file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| ReportError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let config = config.resolve_paths(base)?;
        config.validate()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Expand `~`/`$VARS` and anchor relative directories at `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Result<Self, ReportError> {
        for dir in [&mut self.root_dir, &mut self.content_dir, &mut self.includes_dir] {
            if let Some(path) = dir.take() {
                *dir = Some(expand_dir(&path, base)?);
            }
        }
        Ok(self)
    }

    /// Reject settings that cannot work.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.content_url.is_some() != self.content_dir.is_some() {
            return Err(ReportError::ConfigError {
                message: "content_url and content_dir must be set together".to_string(),
            });
        }
        if self.includes_url.is_some() != self.includes_dir.is_some() {
            return Err(ReportError::ConfigError {
                message: "includes_url and includes_dir must be set together".to_string(),
            });
        }
        if self.max_depth == Some(0) {
            return Err(ReportError::ConfigError {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        if self.max_tree_nodes == Some(0) {
            return Err(ReportError::ConfigError {
                message: "max_tree_nodes must be at least 1".to_string(),
            });
        }
        if self.max_depth.is_some_and(|depth| depth > MAX_TREE_DEPTH) {
            return Err(ReportError::ConfigError {
                message: format!("max_depth must be at most {MAX_TREE_DEPTH}"),
            });
        }
        if self.max_tree_nodes.is_some_and(|nodes| nodes > MAX_TREE_NODES) {
            return Err(ReportError::ConfigError {
                message: format!("max_tree_nodes must be at most {MAX_TREE_NODES}"),
            });
        }
        Ok(())
    }

    /// Tree expansion caps, falling back to the defaults.
    #[must_use]
    pub fn limits(&self) -> TraversalLimits {
        TraversalLimits {
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            max_nodes: self.max_tree_nodes.unwrap_or(DEFAULT_MAX_NODES),
        }
    }

    /// Site root used for size lookups; the current directory when unset.
    #[must_use]
    pub fn root_dir(&self) -> PathBuf {
        self.root_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn expand_dir(path: &Path, base: &Path) -> Result<PathBuf, ReportError> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| ReportError::ConfigError {
        message: format!("cannot expand '{raw}': {e}"),
    })?;
    let expanded = PathBuf::from(expanded.as_ref());
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}
