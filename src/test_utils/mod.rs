//! Test utilities for asset-report
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite.
//!
//! # Example
//!
//! ```rust,no_run
//! use asset_report::test_utils::{RegistryFixture, init_test_logging};
//! use asset_report::resolver::compute_print_order;
//!
//! init_test_logging(None);
//! let registry = RegistryFixture::chain();
//! let order = compute_print_order(registry.queue(), &registry);
//! assert_eq!(order.as_slice(), ["A", "B", "C"]);
//! ```

pub mod fixtures;

pub use fixtures::{RegistryFixture, SnapshotFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays
/// off. Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=asset_report=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
