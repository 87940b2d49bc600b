use predicates::prelude::*;

use super::{asset_report_cmd, workspace_with};
use asset_report::test_utils::SnapshotFixture;

#[tokio::test]
async fn test_missing_snapshot() {
    let temp = tempfile::TempDir::new().unwrap();

    asset_report_cmd(temp.path())
        .args(["report", "nowhere.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Snapshot file not found: nowhere.json"))
        .stderr(predicate::str::contains("Export the registry from the host first"));
}

#[tokio::test]
async fn test_broken_snapshot() {
    let temp = workspace_with(&SnapshotFixture::invalid_syntax());

    asset_report_cmd(temp.path())
        .args(["report", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid snapshot file broken.json"));
}

#[tokio::test]
async fn test_unsupported_format() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["report", "snapshot.json", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format 'xml'"))
        .stderr(predicate::str::contains("text, json"));
}

#[tokio::test]
async fn test_invalid_kind_rejected_by_parser() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["report", "snapshot.json", "--kind", "font"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid asset kind: font"));
}

#[tokio::test]
async fn test_verbose_and_quiet_conflict() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["--verbose", "--quiet", "report", "snapshot.json"])
        .assert()
        .failure()
        .code(2);
}
