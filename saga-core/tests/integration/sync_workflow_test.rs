//! Sync Workflow Integration Tests
//!
//! Reconciliation of the store against the directory.

use std::time::{Duration, Instant};

use saga_core::{ContactInfo, DirectoryUser, SagaError, SyncContext, VisibilityCache};

use crate::common::*;

/// Test: a record the directory doesn't know is removed by sync
#[test]
fn test_sync_removes_contact_absent_from_directory() {
    let service = create_service_with_directory(&[("000328", "wuwei", "ww")]);
    let stray = ContactInfo::new("E10021", "eyotang", "ben大神点C");

    let id = service.storage().create_contact(&stray).unwrap();
    let target = service.storage().query_user_by_id("E10021").unwrap();
    assert_eq!(target.id, id);
    assert!(stray.almost_equal(&target));

    let report = service.sync_contacts(&ctx()).unwrap();
    assert_eq!(report.deleted, 1);

    let err = service.storage().query_user_by_id("E10021").unwrap_err();
    assert!(err.is_not_found());
}

/// Test: a stale local copy is replaced and picks up a pending request
#[test]
fn test_sync_refreshes_stale_contact_and_applies_pending_visibility() {
    let service = create_service_with_directory(&[("000328", "wuwei", "ww")]);
    service.sync_contacts(&ctx()).unwrap();

    // Corrupt the local copy
    let mut modify = service.storage().query_user_by_id("000328").unwrap();
    modify.user_name = "eyotang".into();
    modify.nick_name = "ben大神点C".into();
    modify.visible_saga = false;
    service.storage().update_contact(&modify).unwrap();

    service.add_require_visible(&ctx(), "000328").unwrap();

    let report = service.sync_contacts(&ctx()).unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.visibility_changed, 1);

    let target = service.storage().query_user_by_id("000328").unwrap();
    assert!(target.visible_saga);
    assert_ne!(target.user_name, "eyotang");
    assert_eq!(target.user_name, "wuwei");
    assert_eq!(target.nick_name, "ww");
    assert_eq!(target.id, modify.id);
}

#[test]
fn test_sync_creates_new_directory_users() {
    let service = create_service_with_directory(&[
        ("001134", "zhangsan", "zs"),
        ("000328", "wuwei", ""),
    ]);
    service.directory().set_visible("001134", true);

    let report = service.sync_contacts(&ctx()).unwrap();
    assert_eq!(report.fetched, 2);
    assert_eq!(report.created, 2);

    let zhangsan = service.storage().query_user_by_id("001134").unwrap();
    assert!(zhangsan.visible_saga);
    assert!(!zhangsan.id.is_empty());

    let wuwei = service.storage().query_user_by_id("000328").unwrap();
    assert!(!wuwei.visible_saga);
}

#[test]
fn test_second_sync_is_noop() {
    let service = create_service_with_directory(&[
        ("001134", "zhangsan", "zs"),
        ("000328", "wuwei", ""),
    ]);
    service.directory().set_visible("000328", true);

    service.sync_contacts(&ctx()).unwrap();
    let report = service.sync_contacts(&ctx()).unwrap();

    assert!(report.is_noop(), "unexpected changes: {:?}", report);
    assert_eq!(service.storage().contact_count().unwrap(), 2);
}

#[test]
fn test_sync_revokes_visibility_when_directory_drops_it() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);
    service.directory().set_visible("001134", true);
    service.sync_contacts(&ctx()).unwrap();

    service.directory().set_visible("001134", false);
    let report = service.sync_contacts(&ctx()).unwrap();

    assert_eq!(report.visibility_changed, 1);
    assert!(!service.storage().query_user_by_id("001134").unwrap().visible_saga);
}

#[test]
fn test_sync_settles_pending_requests() {
    let service = create_service_with_directory(&[
        ("001134", "zhangsan", "zs"),
        ("000328", "wuwei", ""),
        ("000777", "lisi", ""),
    ]);
    service.add_require_visible(&ctx(), "001134").unwrap();
    service.add_require_visible(&ctx(), "000328").unwrap();
    service.add_require_visible(&ctx(), "000777").unwrap();

    // 001134 confirmed, 000328 left the directory, 000777 still waiting
    service.directory().set_visible("001134", true);
    service.directory().remove_user("000328");

    let report = service.sync_contacts(&ctx()).unwrap();
    assert_eq!(report.pending_confirmed, 1);
    assert_eq!(report.pending_dropped, 1);

    let pending = service.cache().require_visible_users(&ctx()).unwrap();
    assert_eq!(pending.len(), 1);
    assert!(pending.contains_key("000777"));

    // Confirmed users stay visible without a pending entry
    assert!(service.storage().query_user_by_id("001134").unwrap().visible_saga);
    assert!(service.storage().query_user_by_id("000777").unwrap().visible_saga);
}

#[test]
fn test_sync_skips_entries_without_id() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);
    service.directory().add_user(DirectoryUser::new("", "ghost", ""));

    let report = service.sync_contacts(&ctx()).unwrap();
    assert_eq!(report.fetched, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.created, 1);
}

#[test]
fn test_sync_keeps_last_of_duplicate_directory_entries() {
    let service = create_test_service();
    service
        .directory()
        .push_raw_user(DirectoryUser::new("001134", "zhangsan", "zs"));
    service
        .directory()
        .push_raw_user(DirectoryUser::new("001134", "zhangsan.new", "zs2"));

    let report = service.sync_contacts(&ctx()).unwrap();
    assert_eq!(report.fetched, 2);
    assert_eq!(report.created, 1);

    let stored = service.storage().query_user_by_id("001134").unwrap();
    assert_eq!(stored.user_name, "zhangsan.new");
    assert_eq!(stored.nick_name, "zs2");
    assert_eq!(service.storage().contact_count().unwrap(), 1);
}

#[test]
fn test_sync_fails_when_directory_unavailable() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);
    seed_contact(&service, "E10021", "eyotang", "ben", false);
    service.directory().set_fetch_failure(true);

    let err = service.sync_contacts(&ctx()).unwrap_err();
    assert!(matches!(err, SagaError::Directory(_)));

    // Nothing was deleted on the strength of a failed fetch
    assert!(service.storage().query_user_by_id("E10021").is_ok());
}

#[test]
fn test_sync_with_expired_deadline_writes_nothing() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);
    let ctx = SyncContext::with_deadline(Instant::now() - Duration::from_secs(1));

    let err = service.sync_contacts(&ctx).unwrap_err();
    assert!(matches!(err, SagaError::Context(_)));
    assert_eq!(service.storage().contact_count().unwrap(), 0);
}
