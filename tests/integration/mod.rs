//! Integration tests for the asset-report command line
//!
//! Each test writes a snapshot fixture into a temporary directory and runs the
//! real binary against it.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use asset_report::test_utils::SnapshotFixture;

mod config_lookup;
mod errors;
mod report;
mod tree;
mod why;

/// The binary, running inside `dir` with colors off and no ambient config.
pub fn asset_report_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("asset-report").unwrap();
    cmd.current_dir(dir)
        .arg("--no-color")
        .env("NO_COLOR", "1")
        .env_remove("ASSET_REPORT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A temporary directory holding `fixture`.
pub fn workspace_with(fixture: &SnapshotFixture) -> TempDir {
    let temp = TempDir::new().unwrap();
    fixture.write_to(temp.path()).unwrap();
    temp
}

/// Lay out a site checkout under `root` with files of known size:
/// cart.js 3000 B, utils.js 1024 B and jquery.js 90000 B.
pub fn write_site(root: &Path) {
    let shop = root.join("wp-content/plugins/shop");
    let jquery = root.join("wp-includes/js/jquery");
    fs::create_dir_all(&shop).unwrap();
    fs::create_dir_all(&jquery).unwrap();
    fs::write(shop.join("cart.js"), vec![b'x'; 3000]).unwrap();
    fs::write(shop.join("utils.js"), vec![b'x'; 1024]).unwrap();
    fs::write(jquery.join("jquery.js"), vec![b'x'; 90_000]).unwrap();
}
