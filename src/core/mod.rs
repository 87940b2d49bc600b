//! Core types and error handling for asset-report.
//!
//! - [`ReportError`] and [`ErrorContext`] for typed, user-facing errors
//! - [`AssetKind`] naming the independent registries in a snapshot

mod asset_kind;
pub mod error;

pub use asset_kind::AssetKind;
pub use error::{ErrorContext, ReportError, user_friendly_error};
