//! asset-report - audit asset dependency registries
//!
//! Web hosts keep per-request registries of scripts, styles and script
//! modules: each item has a source locator and a list of dependency names,
//! and a queue names the items a page explicitly asked for. This crate reads
//! an exported snapshot of those registries and answers:
//!
//! - which items actually load (the queue plus its transitive dependencies)
//! - in what order they print, dependencies first
//! - who depends on each item, and which queued item pulled it in
//! - which items point at the same file
//! - how many bytes the loaded files add up to
//!
//! # Modules
//!
//! - [`core`] - asset kinds and the error type
//! - [`registry`] - items, registries and snapshot loading
//! - [`resolver`] - closure walks, reverse indexes, provenance and cycles
//! - [`report`] - report assembly, size lookups, list and tree views
//! - [`config`] - `asset-report.toml` loading
//! - [`cli`] - the `asset-report` command line
//! - [`utils`] - formatting and name suggestions
//!
//! # Example
//!
//! ```
//! use asset_report::core::AssetKind;
//! use asset_report::registry::{Item, RegistryBuilder};
//! use asset_report::report::ReportAssembler;
//!
//! let mut builder = RegistryBuilder::new(AssetKind::Script);
//! builder.register("jquery", Item::new("/js/jquery.js"), Some("core"));
//! builder.register("cart", Item::new("/js/cart.js").with_deps(["jquery"]), None);
//! builder.enqueue("cart");
//! let registry = builder.build();
//!
//! let mut assembler = ReportAssembler::new(|_: &str| Some(1024_u64));
//! let report = assembler.analyze(&registry);
//!
//! assert_eq!(report.print_order.as_slice(), ["jquery", "cart"]);
//! assert_eq!(report.total_size, 2048);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
