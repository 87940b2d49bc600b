use predicates::prelude::*;
use serde_json::Value;

use super::{asset_report_cmd, workspace_with, write_site};
use asset_report::test_utils::SnapshotFixture;

#[tokio::test]
async fn test_report_text_sections() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .arg("report")
        .arg("snapshot.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Asset report 2024-05-01 12:00:00 https://example.test/shop/"))
        .stdout(predicate::str::contains("JavaScript"))
        .stdout(predicate::str::contains("CSS"))
        .stdout(predicate::str::contains("Modules"))
        .stdout(predicate::str::contains("registered on this site"))
        .stdout(predicate::str::contains("shop-cart #6 ENQUEUED FOOTER INLINE 28 B"))
        .stdout(predicate::str::contains("jquery-core #1 DUPLICATE SRC"))
        .stdout(predicate::str::contains("Same file as: legacy-jquery"))
        .stdout(predicate::str::contains("Loaded because of: shop-cart, theme-slider"))
        .stdout(predicate::str::contains("Used by: shop-utils, theme-slider"))
        .stdout(predicate::str::contains("MISSING swiper"))
        .stdout(predicate::str::contains("idle-widget").not());
}

#[tokio::test]
async fn test_report_accepts_placeholder_sources() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("wp.json"),
        r#"{
  "scripts": {
    "queue": ["jquery"],
    "registered": {
      "jquery": { "src": false, "ver": "3.7.1", "deps": ["jquery-core"] },
      "jquery-core": { "src": "/wp-includes/js/jquery/jquery.js", "ver": false }
    }
  }
}"#,
    )
    .unwrap();

    asset_report_cmd(temp.path())
        .args(["report", "wp.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jquery #2 ENQUEUED"))
        .stdout(predicate::str::contains("jquery-core #1"))
        .stdout(predicate::str::contains("Loaded because of: jquery"));
}

#[tokio::test]
async fn test_report_sizes_from_site_root() {
    let temp = workspace_with(&SnapshotFixture::shop());
    write_site(&temp.path().join("site"));

    asset_report_cmd(temp.path())
        .args(["report", "snapshot.json", "--kind", "script", "--root", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("91.8 KB"))
        .stdout(predicate::str::contains("shop-cart #6 2.9 KB ENQUEUED"))
        .stdout(predicate::str::contains("jquery-core #1 87.9 KB"));
}

#[tokio::test]
async fn test_report_json() {
    let temp = workspace_with(&SnapshotFixture::shop());
    write_site(&temp.path().join("site"));

    let output = asset_report_cmd(temp.path())
        .args(["report", "snapshot.json", "--format", "json", "--root", "site"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["generated_at"], "2024-05-01 12:00:00");

    let scripts = &json["scripts"];
    assert_eq!(
        scripts["print_order"],
        serde_json::json!([
            "jquery-core",
            "jquery-migrate",
            "jquery",
            "shop-utils",
            "wp-hooks",
            "shop-cart",
            "swiper",
            "theme-slider"
        ])
    );
    assert_eq!(scripts["registered_count"], 9);
    assert_eq!(scripts["queued_count"], 2);
    assert_eq!(scripts["total_size"], 94_024);
    assert_eq!(scripts["missing"], serde_json::json!(["swiper"]));
    assert_eq!(
        scripts["duplicate_groups"]["/wp-includes/js/jquery/jquery.js"],
        serde_json::json!(["jquery-core", "legacy-jquery"])
    );
    assert_eq!(scripts["cycles"], serde_json::json!([]));

    assert_eq!(json["styles"]["needed"], serde_json::json!(["fonts", "theme-style"]));
    assert_eq!(json["modules"]["print_order"], serde_json::json!(["@wordpress/interactivity", "@shop/app"]));
}

#[tokio::test]
async fn test_report_kind_filter() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["report", "snapshot.json", "--kind", "style"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CSS"))
        .stdout(predicate::str::contains("theme-style #2 ENQUEUED"))
        .stdout(predicate::str::contains("JavaScript").not());
}

#[tokio::test]
async fn test_report_cycle_from_yaml() {
    let temp = workspace_with(&SnapshotFixture::cycle());

    asset_report_cmd(temp.path())
        .args(["report", "cycle.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CIRCULAR a ↔ b"))
        .stderr(predicate::str::contains("Circular style dependency: a ↔ b"));
}

#[tokio::test]
async fn test_report_toml_snapshot() {
    let temp = workspace_with(&SnapshotFixture::toml_chain());

    asset_report_cmd(temp.path())
        .args(["report", "snapshot.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A #1"))
        .stdout(predicate::str::contains("C #3 ENQUEUED"))
        .stdout(predicate::str::contains("CSS").not());
}

#[tokio::test]
async fn test_report_empty_snapshot() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(temp.path().join("empty.json"), "{}").unwrap();

    asset_report_cmd(temp.path())
        .args(["report", "empty.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No registries found in snapshot."));
}
