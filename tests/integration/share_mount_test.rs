//! Integration tests for shared mounts.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use mountview::{AppConfig, AppResult, GroupLookup, MountView, Ports, ResolveWarning, SharePermissions};
use mountview_core::types::{GroupId, ShareId, UserId};
use mountview_database::{ShareRepository, StorageConfigRepository};
use mountview_entity::share::{Share, ShareState};

use helpers::{TestApp, record};

#[tokio::test]
async fn test_direct_and_group_share_merge_into_one_mount() {
    let app = TestApp::new();
    app.add_user("user1", &["group1"]).await;
    app.add_user("user4", &["group1"]).await;

    app.share_with_user(1, 100, "user2", "user1", "/share2-renamed", SharePermissions::READ)
        .await;
    app.share_with_group(
        2,
        100,
        "user2",
        "group1",
        "/share2",
        SharePermissions::READ | SharePermissions::UPDATE,
    )
    .await;

    let user1 = UserId::from("user1");
    let mounts = app.view.shared_mounts(&user1).await.unwrap();

    assert_eq!(mounts.mounts.len(), 1);
    assert!(mounts.warnings.is_empty());

    let mount = mounts.find("/user1/files/share2-renamed").expect("mount");
    assert_eq!(mount.share.id, ShareId(1));
    assert_eq!(mount.share.permissions.bits(), 3);
    assert_eq!(mount.share.contributing, vec![ShareId(1), ShareId(2)]);
    assert!(
        mount
            .grouped_shares
            .iter()
            .all(|s| s.target() == "/share2-renamed")
    );

    // Only user1's view of the group share moved.
    assert_eq!(
        app.shares.target_override(ShareId(2), &user1).await.as_deref(),
        Some("/share2-renamed")
    );
    let user4 = app
        .view
        .shared_mounts(&UserId::from("user4"))
        .await
        .unwrap();
    assert!(user4.find("/user4/files/share2").is_some());
}

#[tokio::test]
async fn test_resolving_twice_is_stable() {
    let app = TestApp::new();
    app.add_user("user1", &["group1"]).await;
    app.share_with_group(1, 100, "user2", "group1", "/docs", SharePermissions::READ)
        .await;
    app.share_with_group(2, 100, "user3", "group1", "/docs (2)", SharePermissions::SHARE)
        .await;

    let user1 = UserId::from("user1");
    let first = app.view.shared_mounts(&user1).await.unwrap();
    let second = app.view.shared_mounts(&user1).await.unwrap();

    assert_eq!(first.mounts.len(), 1);
    assert_eq!(
        first.mounts[0].share, second.mounts[0].share,
        "second resolution should see the reconciled targets"
    );
    assert_eq!(second.mounts[0].mount_point, "/user1/files/docs");
    assert_eq!(second.mounts[0].share.permissions.bits(), 17);
}

#[tokio::test]
async fn test_unusable_shares_produce_no_mounts() {
    let app = TestApp::new();
    app.add_user("user1", &["group1"]).await;

    app.share_with_user(1, 100, "user2", "user1", "/opted-out", SharePermissions::NONE)
        .await;
    app.share_with_group(2, 101, "user1", "group1", "/mine", SharePermissions::ALL)
        .await;
    app.shares
        .create(Share::user(
            record(3, 102, "user2", "/pending", SharePermissions::ALL)
                .with_state(ShareState::Pending),
            UserId::from("user1"),
        ))
        .await
        .unwrap();

    let mounts = app
        .view
        .shared_mounts(&UserId::from("user1"))
        .await
        .unwrap();
    assert!(mounts.mounts.is_empty());
    assert!(mounts.warnings.is_empty());
}

#[tokio::test]
async fn test_invalid_share_is_reported_and_skipped() {
    let app = TestApp::new();
    app.share_with_user(1, 100, "user2", "user1", "  ", SharePermissions::ALL)
        .await;
    app.share_with_user(2, 101, "user2", "user1", "/fine", SharePermissions::ALL)
        .await;

    let mounts = app
        .view
        .shared_mounts(&UserId::from("user1"))
        .await
        .unwrap();

    assert_eq!(mounts.mounts.len(), 1);
    assert_eq!(mounts.mounts[0].mount_point, "/user1/files/fine");
    assert!(matches!(
        mounts.warnings.as_slice(),
        [ResolveWarning::InvalidShare { share_id, .. }] if *share_id == ShareId(1)
    ));
}

#[tokio::test]
async fn test_mounts_follow_share_creation_order() {
    let app = TestApp::new();
    app.add_user("user1", &["group1"]).await;
    app.share_with_group(3, 100, "user2", "group1", "/later", SharePermissions::READ)
        .await;
    app.share_with_user(1, 101, "user3", "user1", "/first", SharePermissions::READ)
        .await;
    app.share_with_user(2, 100, "user2", "user1", "/earlier", SharePermissions::UPDATE)
        .await;

    let mounts = app
        .view
        .shared_mounts(&UserId::from("user1"))
        .await
        .unwrap();

    let points: Vec<&str> = mounts.mounts.iter().map(|m| m.mount_point.as_str()).collect();
    assert_eq!(points, vec!["/user1/files/first", "/user1/files/earlier"]);
}

#[tokio::test]
async fn test_reconciliation_can_be_disabled() {
    let mut config = AppConfig::default();
    config.group_cache.enabled = false;
    config.resolver.reconcile_targets = false;
    let app = TestApp::with_config(config);
    app.add_user("user1", &["group1"]).await;

    app.share_with_user(1, 100, "user2", "user1", "/mine", SharePermissions::READ)
        .await;
    app.share_with_group(2, 100, "user2", "group1", "/theirs", SharePermissions::READ)
        .await;

    let user1 = UserId::from("user1");
    let mounts = app.view.shared_mounts(&user1).await.unwrap();

    assert_eq!(mounts.mounts[0].mount_point, "/user1/files/mine");
    assert!(app.shares.target_override(ShareId(2), &user1).await.is_none());
}

#[test]
fn test_config_file_loads() {
    let config = AppConfig::load_from("config", "test").expect("load");
    assert!(config.resolver.reconcile_targets);
    assert!(config.group_cache.enabled);
}

/// Reports `user1` in `group1` once, then as having left every group.
#[derive(Default)]
struct LeavesAfterFirstLookup {
    calls: AtomicUsize,
}

#[async_trait]
impl GroupLookup for LeavesAfterFirstLookup {
    async fn groups_of(&self, _user: &UserId) -> AppResult<HashSet<GroupId>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(HashSet::from([GroupId::from("group1")]))
        } else {
            Ok(HashSet::new())
        }
    }
}

#[tokio::test]
async fn test_rename_rejected_after_leaving_group() {
    let groups = Arc::new(LeavesAfterFirstLookup::default());
    let shares = Arc::new(ShareRepository::new(groups.clone()));
    let storages = Arc::new(StorageConfigRepository::new());
    let view = MountView::new(
        &AppConfig::default(),
        Ports {
            shares: shares.clone(),
            share_mutation: shares.clone(),
            groups,
            storages,
        },
    );

    shares
        .create(Share::user(
            record(1, 100, "user2", "/share2-renamed", SharePermissions::ALL),
            UserId::from("user1"),
        ))
        .await
        .unwrap();
    shares
        .create(Share::group(
            record(2, 100, "user2", "/share2", SharePermissions::READ),
            GroupId::from("group1"),
        ))
        .await
        .unwrap();

    let mounts = view.shared_mounts(&UserId::from("user1")).await.unwrap();

    assert_eq!(mounts.mounts.len(), 1);
    assert_eq!(mounts.mounts[0].mount_point, "/user1/files/share2-renamed");
    assert!(matches!(
        mounts.warnings.as_slice(),
        [ResolveWarning::TargetRenameFailed { share_id, target, .. }]
            if *share_id == ShareId(2) && target == "/share2-renamed"
    ));
}
