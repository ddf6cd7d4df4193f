//! Visibility Workflow Integration Tests
//!
//! Pending visibility requests: adding, idempotency and cache lookups.

use saga_core::{ContactInfo, SagaError, SyncContext, VisibilityCache};

use crate::common::*;

#[test]
fn test_add_require_visible_rejects_unknown_user() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);

    let err = service.add_require_visible(&ctx(), "000000").unwrap_err();
    assert!(matches!(err, SagaError::NotFound(_)));
    assert!(!service.already_in_cache(&ctx(), "000000").unwrap());
}

#[test]
fn test_add_require_visible_rejects_empty_id() {
    let service = create_test_service();

    let err = service.add_require_visible(&ctx(), "  ").unwrap_err();
    assert!(matches!(err, SagaError::Validation(_)));
}

#[test]
fn test_add_require_visible_for_directory_user() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);

    service.add_require_visible(&ctx(), "001134").unwrap();

    let users = service.cache().require_visible_users(&ctx()).unwrap();
    assert!(users.contains_key("001134"));
    assert_eq!(users["001134"].user_name, "zhangsan");
    assert_eq!(users["001134"].nick_name, "zs");
}

#[test]
fn test_add_require_visible_prefers_stored_contact() {
    // Known locally but not (yet) in the directory
    let service = create_test_service();
    seed_contact(&service, "E10021", "eyotang", "ben", false);

    service.add_require_visible(&ctx(), "E10021").unwrap();

    let users = service.cache().require_visible_users(&ctx()).unwrap();
    assert_eq!(users["E10021"].user_name, "eyotang");
}

#[test]
fn test_add_require_visible_is_idempotent() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);

    service.add_require_visible(&ctx(), "001134").unwrap();

    // The directory forgetting the user must not matter for a pending request
    service.directory().remove_user("001134");
    service.add_require_visible(&ctx(), "001134").unwrap();

    let users = service.cache().require_visible_users(&ctx()).unwrap();
    assert_eq!(users.len(), 1);
}

#[test]
fn test_already_in_cache() {
    let service = create_test_service();
    let contact = ContactInfo {
        id: "111".into(),
        user_id: "222".into(),
        user_name: "zhangsan".into(),
        nick_name: "xiaolizi".into(),
        visible_saga: true,
    };

    assert!(!service.already_in_cache(&ctx(), "000").unwrap());

    service
        .cache()
        .set_require_visible_user(&ctx(), &contact)
        .unwrap();

    assert!(service.already_in_cache(&ctx(), "222").unwrap());
    assert!(!service.already_in_cache(&ctx(), "000").unwrap());
}

#[test]
fn test_directory_failure_propagates() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);
    service.directory().set_fetch_failure(true);

    let err = service.add_require_visible(&ctx(), "001134").unwrap_err();
    assert!(matches!(err, SagaError::Directory(_)));
}

#[test]
fn test_cancelled_context_stops_visibility_request() {
    let service = create_service_with_directory(&[("001134", "zhangsan", "zs")]);
    let ctx = SyncContext::background();
    ctx.cancel();

    let err = service.add_require_visible(&ctx, "001134").unwrap_err();
    assert!(matches!(err, SagaError::Context(_)));
}
