//! Asset kinds tracked by the host runtime.

use serde::{Deserialize, Serialize};

use crate::core::ReportError;

/// The class of asset a registry holds.
///
/// Each kind has its own independent registry and queue in a snapshot, and
/// the analysis runs separately per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// JavaScript files
    ///
    /// Scripts carry presentation flags in their extra bag: footer placement
    /// and inline payloads.
    Script,

    /// Stylesheets
    Style,

    /// Script modules
    Module,
}

impl AssetKind {
    /// All kinds, in report order.
    #[must_use]
    pub const fn all() -> &'static [AssetKind] {
        &[AssetKind::Script, AssetKind::Style, AssetKind::Module]
    }

    /// Plural heading used in report output ("Scripts", "Styles", "Modules").
    #[must_use]
    pub const fn plural(&self) -> &'static str {
        match self {
            AssetKind::Script => "Scripts",
            AssetKind::Style => "Styles",
            AssetKind::Module => "Modules",
        }
    }

    /// Section title matching the asset language.
    #[must_use]
    pub const fn section_title(&self) -> &'static str {
        match self {
            AssetKind::Script => "JavaScript",
            AssetKind::Style => "CSS",
            AssetKind::Module => "Modules",
        }
    }

    /// Whether footer / inline badges apply to this kind.
    #[must_use]
    pub const fn has_script_badges(&self) -> bool {
        matches!(self, AssetKind::Script)
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Script => write!(f, "script"),
            AssetKind::Style => write!(f, "style"),
            AssetKind::Module => write!(f, "module"),
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "script" | "scripts" | "js" => Ok(AssetKind::Script),
            "style" | "styles" | "css" => Ok(AssetKind::Style),
            "module" | "modules" => Ok(AssetKind::Module),
            _ => Err(ReportError::InvalidAssetKind {
                kind: s.to_string(),
            }),
        }
    }
}
