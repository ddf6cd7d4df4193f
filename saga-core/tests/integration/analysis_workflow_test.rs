//! Analysis Workflow Integration Tests

use saga_core::SagaError;

use crate::common::*;

#[test]
fn test_analysis_contacts_on_populated_store() {
    let service = create_service_with_directory(&[
        ("000328", "wuwei", "ww"),
        ("001134", "zhangsan", "zs"),
        ("000777", "lisi", ""),
    ]);
    service.directory().set_visible("000328", true);
    service.sync_contacts(&ctx()).unwrap();

    // Drift the store away from the directory
    let mut wuwei = service.storage().query_user_by_id("000328").unwrap();
    wuwei.user_name = "eyotang".into();
    service.storage().update_contact(&wuwei).unwrap();
    service.storage().delete_contact("000777").unwrap();
    seed_contact(&service, "E10021", "eyotang", "ben", false);
    service.add_require_visible(&ctx(), "001134").unwrap();

    let analysis = service.analysis_contacts(&ctx()).unwrap();

    assert_eq!(analysis.store_total, 3);
    assert_eq!(analysis.directory_total, 3);
    assert_eq!(analysis.visible, 1);
    assert_eq!(analysis.invisible, 2);
    assert_eq!(analysis.pending_visible, 1);
    assert_eq!(analysis.missing_from_store, vec!["000777".to_string()]);
    assert_eq!(analysis.stale_in_store, vec!["E10021".to_string()]);
    assert_eq!(analysis.drifted, vec!["000328".to_string()]);
    // 001134 is pending but still stored as invisible
    assert_eq!(analysis.visibility_drift, vec!["001134".to_string()]);
    assert!(!analysis.is_in_sync());
}

#[test]
fn test_analysis_contacts_writes_nothing() {
    let service = create_service_with_directory(&[("000328", "wuwei", "ww")]);
    seed_contact(&service, "E10021", "eyotang", "ben", false);
    let before = service.list_contacts().unwrap();

    service.analysis_contacts(&ctx()).unwrap();

    assert_eq!(service.list_contacts().unwrap(), before);
}

#[test]
fn test_analysis_after_sync_is_in_sync() {
    let service = create_service_with_directory(&[
        ("000328", "wuwei", "ww"),
        ("001134", "zhangsan", "zs"),
    ]);
    service.sync_contacts(&ctx()).unwrap();

    let analysis = service.analysis_contacts(&ctx()).unwrap();
    assert!(analysis.is_in_sync());
}

#[test]
fn test_analysis_reports_visibility_drift_that_sync_fixes() {
    let service = create_service_with_directory(&[
        ("000328", "wuwei", "ww"),
        ("001134", "zhangsan", "zs"),
    ]);
    service.sync_contacts(&ctx()).unwrap();

    service.directory().set_visible("000328", true);

    let analysis = service.analysis_contacts(&ctx()).unwrap();
    assert_eq!(analysis.visibility_drift, vec!["000328".to_string()]);
    assert!(!analysis.is_in_sync());

    let report = service.sync_contacts(&ctx()).unwrap();
    assert_eq!(report.visibility_changed, 1);

    // Once sync has run, analysis and a further sync agree there is nothing to do
    let analysis = service.analysis_contacts(&ctx()).unwrap();
    assert!(analysis.is_in_sync());
    assert!(service.sync_contacts(&ctx()).unwrap().is_noop());
}

#[test]
fn test_analysis_propagates_directory_failure() {
    let service = create_test_service();
    service.directory().set_fetch_failure(true);

    let err = service.analysis_contacts(&ctx()).unwrap_err();
    assert!(matches!(err, SagaError::Directory(_)));
}
