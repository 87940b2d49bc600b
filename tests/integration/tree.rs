use predicates::prelude::*;
use serde_json::Value;

use super::{asset_report_cmd, workspace_with};
use asset_report::test_utils::SnapshotFixture;

#[tokio::test]
async fn test_tree_text() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["tree", "snapshot.json", "--kind", "script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JavaScript"))
        .stdout(predicate::str::contains(
            "├── shop-cart v1.2 https://example.test/wp-content/plugins/shop/cart.js ENQUEUED FOOTER INLINE 28 B (added by plugin: shop)",
        ))
        .stdout(predicate::str::contains("│   │   └── jquery v3.7.1 (added by core)"))
        .stdout(predicate::str::contains("│   └── wp-hooks /wp-includes/js/dist/hooks.min.js (added by core)"))
        .stdout(predicate::str::contains("└── theme-slider"))
        .stdout(predicate::str::contains("    └── swiper MISSING"))
        .stdout(predicate::str::contains("not expanded").not());
}

#[tokio::test]
async fn test_tree_depth_limit() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["tree", "snapshot.json", "--kind", "script", "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("│   ├── shop-utils"))
        .stdout(predicate::str::contains("│   │   └── jquery (…)"))
        .stdout(predicate::str::contains("(…) = not expanded, depth or node limit reached"))
        .stderr(predicate::str::contains("script dependency tree truncated"));
}

#[tokio::test]
async fn test_tree_zero_depth_rejected() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["tree", "snapshot.json", "--depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Depth must be at least 1"));
}

#[tokio::test]
async fn test_tree_depth_above_ceiling_rejected() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["tree", "snapshot.json", "--depth", "1000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Depth must be at most 256"));
}

#[tokio::test]
async fn test_tree_marks_cycles() {
    let temp = workspace_with(&SnapshotFixture::cycle());

    asset_report_cmd(temp.path())
        .args(["tree", "cycle.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("└── a /a.css ENQUEUED"))
        .stdout(predicate::str::contains("    └── b /b.css"))
        .stdout(predicate::str::contains("        └── a CIRCULAR"));
}

#[tokio::test]
async fn test_tree_json() {
    let temp = workspace_with(&SnapshotFixture::shop());

    let output = asset_report_cmd(temp.path())
        .args(["tree", "snapshot.json", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let roots = json["scripts"]["roots"].as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["name"], "shop-cart");
    assert_eq!(roots[0]["status"], "present");
    assert_eq!(roots[1]["children"][1]["name"], "swiper");
    assert_eq!(roots[1]["children"][1]["status"], "missing");
    assert!(json["scripts"].get("truncated").is_none());
    assert_eq!(json["styles"]["roots"][0]["name"], "theme-style");
}
