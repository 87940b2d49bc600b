use predicates::prelude::*;
use std::fs;

use super::{asset_report_cmd, workspace_with, write_site};
use asset_report::test_utils::SnapshotFixture;

const SHOP_CONFIG: &str = r#"
root_dir = "site"
content_url = "https://example.test/wp-content"
content_dir = "site/wp-content"
"#;

#[tokio::test]
async fn test_local_config_file() {
    let temp = workspace_with(&SnapshotFixture::shop());
    write_site(&temp.path().join("site"));
    fs::write(temp.path().join("asset-report.toml"), SHOP_CONFIG).unwrap();

    asset_report_cmd(temp.path())
        .args(["report", "snapshot.json", "--kind", "script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shop-cart #6 2.9 KB"))
        .stdout(predicate::str::contains("91.8 KB"));
}

#[tokio::test]
async fn test_config_flag_resolves_paths_next_to_file() {
    let temp = workspace_with(&SnapshotFixture::shop());
    let conf_dir = temp.path().join("conf");
    write_site(&conf_dir.join("site"));
    fs::write(conf_dir.join("custom.toml"), SHOP_CONFIG).unwrap();

    asset_report_cmd(temp.path())
        .args(["--config", "conf/custom.toml", "report", "snapshot.json", "--kind", "script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shop-utils #4 1 KB"));
}

#[tokio::test]
async fn test_config_from_environment() {
    let temp = workspace_with(&SnapshotFixture::shop());
    write_site(&temp.path().join("site"));
    let config = temp.path().join("env.toml");
    fs::write(&config, SHOP_CONFIG).unwrap();

    asset_report_cmd(temp.path())
        .env("ASSET_REPORT_CONFIG", &config)
        .args(["report", "snapshot.json", "--kind", "script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jquery-core #1 87.9 KB"));
}

#[tokio::test]
async fn test_missing_explicit_config() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["--config", "missing.toml", "report", "snapshot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[tokio::test]
async fn test_unknown_config_key() {
    let temp = workspace_with(&SnapshotFixture::shop());
    fs::write(temp.path().join("asset-report.toml"), "max_dpeth = 4\n").unwrap();

    asset_report_cmd(temp.path())
        .args(["report", "snapshot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file"))
        .stderr(predicate::str::contains("max_tree_nodes"));
}

#[tokio::test]
async fn test_config_depth_limit_applies_to_tree() {
    let temp = workspace_with(&SnapshotFixture::shop());
    fs::write(temp.path().join("asset-report.toml"), "max_depth = 1\n").unwrap();

    asset_report_cmd(temp.path())
        .args(["tree", "snapshot.json", "--kind", "script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jquery (…)"));
}

#[tokio::test]
async fn test_config_tree_caps_above_ceiling_rejected() {
    let temp = workspace_with(&SnapshotFixture::shop());
    fs::write(temp.path().join("asset-report.toml"), "max_tree_nodes = 1000000\n").unwrap();

    asset_report_cmd(temp.path())
        .args(["tree", "snapshot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_tree_nodes must be at most 100000"));
}
