use predicates::prelude::*;

use super::{asset_report_cmd, workspace_with};
use asset_report::test_utils::SnapshotFixture;

#[tokio::test]
async fn test_why_shows_chains() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["why", "snapshot.json", "jquery-core"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jquery-core (script)"))
        .stdout(predicate::str::contains("Loaded because of: shop-cart, theme-slider"))
        .stdout(predicate::str::contains("shop-cart → shop-utils → jquery → jquery-core"))
        .stdout(predicate::str::contains("theme-slider → jquery → jquery-core"));
}

#[tokio::test]
async fn test_why_queued_item() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["why", "snapshot.json", "shop-cart", "--kind", "script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ENQUEUED requested directly"));
}

#[tokio::test]
async fn test_why_unloaded_item() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["why", "snapshot.json", "admin-bar", "--kind", "style"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin-bar (style)"))
        .stdout(predicate::str::contains("Not loaded on this page"));
}

#[tokio::test]
async fn test_why_missing_dependency() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["why", "snapshot.json", "swiper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("swiper (script) MISSING"))
        .stdout(predicate::str::contains("theme-slider → swiper"));
}

#[tokio::test]
async fn test_why_unknown_name_suggests() {
    let temp = workspace_with(&SnapshotFixture::shop());

    asset_report_cmd(temp.path())
        .args(["why", "snapshot.json", "jqeury-core"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("asset 'jqeury-core' is not registered"))
        .stderr(predicate::str::contains("Did you mean: jquery-core?"));
}
