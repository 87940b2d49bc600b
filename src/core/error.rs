//! Error handling for asset-report
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** for precise handling in code ([`ReportError`])
//! 2. **User-friendly messages** with actionable suggestions for CLI users ([`ErrorContext`])
//!
//! Note that the graph analysis itself never fails on graph data. Dangling
//! names, cycles, unresolvable sizes and untraceable provenance are all
//! representable states and are reported, not raised. The variants below cover
//! the edges of the tool: reading snapshots and configuration, and resolving
//! names the user typed on the command line.
//!
//! # Examples
//!
//! ```rust,no_run
//! use asset_report::core::{ErrorContext, ReportError, user_friendly_error};
//!
//! let error = ReportError::SnapshotNotFound {
//!     path: "snapshot.json".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for asset-report operations.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The snapshot file passed on the command line does not exist.
    #[error("Snapshot file not found: {path}")]
    SnapshotNotFound {
        /// Path as given by the user
        path: String,
    },

    /// The snapshot file exists but could not be decoded.
    #[error("Invalid snapshot file {file}: {reason}")]
    SnapshotParseError {
        /// Snapshot path
        file: String,
        /// Decoder message
        reason: String,
    },

    /// Output or input format that the tool does not understand.
    #[error("Unsupported format '{format}'. Valid formats are: {valid}")]
    UnsupportedFormat {
        /// The format requested
        format: String,
        /// Comma separated list of accepted formats
        valid: String,
    },

    /// Configuration values are inconsistent or unusable.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Configuration file could not be parsed.
    #[error("Invalid configuration file {file}: {reason}")]
    ConfigParseError {
        /// Config path
        file: String,
        /// Parser message
        reason: String,
    },

    /// A name given on the command line is not registered for the asset kind.
    #[error("{kind} '{name}' is not registered")]
    ItemNotFound {
        /// Requested name
        name: String,
        /// Asset kind that was searched
        kind: String,
        /// Close matches among the registered names
        suggestions: Vec<String>,
    },

    /// Unknown asset kind string.
    #[error("Invalid asset kind: {kind}")]
    InvalidAssetKind {
        /// The string that failed to parse
        kind: String,
    },

    /// IO error from [`std::io::Error`]
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error from [`toml::de::Error`]
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON error from [`serde_json::Error`]
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error from [`serde_yaml::Error`]
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Anything else, carrying a preformatted message.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error wrapper that adds user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ReportError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ReportError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    ///
    /// Details are displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`ReportError`] variants, [`std::io::Error`] kinds and TOML
/// errors; anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(report_error) = error.downcast_ref::<ReportError>() {
        return create_error_context(report_error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ReportError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check the file permissions of the snapshot and config files");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ReportError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(ReportError::ConfigParseError {
            file: "asset-report.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax: quotes, brackets and key names");
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ReportError::Other {
        message,
    })
}

/// Map each [`ReportError`] variant to tailored suggestions.
fn create_error_context(error: &ReportError) -> ErrorContext {
    match error {
        ReportError::SnapshotNotFound {
            path,
        } => ErrorContext::new(ReportError::SnapshotNotFound {
            path: path.clone(),
        })
        .with_suggestion("Export the registry from the host first, or check the path")
        .with_details("A snapshot is a JSON, TOML or YAML file with `scripts`, `styles` and `modules` sections"),
        ReportError::SnapshotParseError {
            file,
            reason,
        } => ErrorContext::new(ReportError::SnapshotParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_suggestion(
            "Each section needs a `registered` map of name -> { src, ver, deps, extra } and a `queue` list",
        ),
        ReportError::UnsupportedFormat {
            format,
            valid,
        } => ErrorContext::new(ReportError::UnsupportedFormat {
            format: format.clone(),
            valid: valid.clone(),
        })
        .with_suggestion(format!("Use one of: {valid}")),
        ReportError::ConfigError {
            message,
        } => ErrorContext::new(ReportError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion("Check asset-report.toml or the file passed with --config"),
        ReportError::ConfigParseError {
            file,
            reason,
        } => ErrorContext::new(ReportError::ConfigParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Valid keys: root_dir, content_url, content_dir, includes_url, includes_dir, max_depth, max_tree_nodes"),
        ReportError::ItemNotFound {
            name,
            kind,
            suggestions,
        } => {
            let ctx = ErrorContext::new(ReportError::ItemNotFound {
                name: name.clone(),
                kind: kind.clone(),
                suggestions: suggestions.clone(),
            });
            if suggestions.is_empty() {
                ctx.with_suggestion("Run 'asset-report report' to list the loaded names")
            } else {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
        ReportError::InvalidAssetKind {
            kind,
        } => ErrorContext::new(ReportError::InvalidAssetKind {
            kind: kind.clone(),
        })
        .with_suggestion("Valid kinds are: script, style, module"),
        other => ErrorContext::new(ReportError::Other {
            message: other.to_string(),
        }),
    }
}
