//! Push Workflow Integration Tests
//!
//! Sending notifications to named recipients.

use saga_core::{SagaError, VisibilityCache};

use crate::common::*;

fn visible_service() -> TestService {
    let service = create_service_with_directory(&[
        ("000328", "wuwei", "ww"),
        ("001134", "zhangsan", "zs"),
    ]);
    service.directory().set_visible("000328", true);
    service.sync_contacts(&ctx()).unwrap();
    service
}

#[test]
fn test_push_msg_to_visible_user() {
    let service = visible_service();

    let report = service
        .push_msg(&ctx(), &["wuwei"], "测试发送企业微信")
        .unwrap();

    assert_eq!(report.delivered, vec!["000328".to_string()]);
    let sent = service.directory().sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_ids, vec!["000328".to_string()]);
    assert_eq!(sent[0].content, "测试发送企业微信");
}

#[test]
fn test_push_msg_queues_invisible_recipients() {
    let service = visible_service();

    let report = service
        .push_msg(&ctx(), &["wuwei", "zhangsan"], "deploy done")
        .unwrap();

    assert_eq!(report.delivered, vec!["000328".to_string()]);
    assert_eq!(report.pending_visible, vec!["001134".to_string()]);
    assert!(service.already_in_cache(&ctx(), "001134").unwrap());
    assert_eq!(service.directory().sent_messages()[0].user_ids.len(), 1);
}

#[test]
fn test_push_msg_only_invisible_recipients_sends_nothing() {
    let service = visible_service();

    let report = service.push_msg(&ctx(), &["zhangsan"], "hello").unwrap();

    assert!(report.delivered.is_empty());
    assert_eq!(report.pending_visible, vec!["001134".to_string()]);
    assert!(service.directory().sent_messages().is_empty());
}

#[test]
fn test_push_msg_reports_unknown_names() {
    let service = visible_service();

    let report = service
        .push_msg(&ctx(), &["wuwei", "nobody"], "hello")
        .unwrap();
    assert_eq!(report.unknown, vec!["nobody".to_string()]);

    let err = service.push_msg(&ctx(), &["nobody"], "hello").unwrap_err();
    assert!(matches!(err, SagaError::NotFound(_)));
}

#[test]
fn test_push_msg_validates_input() {
    let service = visible_service();

    let err = service.push_msg(&ctx(), &["wuwei"], "   ").unwrap_err();
    assert!(matches!(err, SagaError::Validation(_)));

    let none: [&str; 0] = [];
    let err = service.push_msg(&ctx(), &none, "hello").unwrap_err();
    assert!(matches!(err, SagaError::Validation(_)));

    let err = service.push_msg(&ctx(), &["", " "], "hello").unwrap_err();
    assert!(matches!(err, SagaError::Validation(_)));
}

#[test]
fn test_push_msg_deduplicates_recipients() {
    let service = visible_service();

    let names = vec!["wuwei".to_string(), " wuwei ".to_string()];
    let report = service.push_msg(&ctx(), &names, "hello").unwrap();

    assert_eq!(report.delivered.len(), 1);
}

#[test]
fn test_push_msg_delivery_failure() {
    let service = visible_service();
    service.directory().set_send_failure(true);

    let err = service.push_msg(&ctx(), &["wuwei"], "hello").unwrap_err();
    assert!(matches!(err, SagaError::Delivery(_)));
}

#[test]
fn test_push_msg_reports_rejected_recipients() {
    let service = visible_service();
    service.directory().reject_user("000328");

    let report = service.push_msg(&ctx(), &["wuwei"], "hello").unwrap();

    assert!(report.delivered.is_empty());
    assert_eq!(report.rejected, vec!["000328".to_string()]);
    assert!(service
        .cache()
        .require_visible_users(&ctx())
        .unwrap()
        .is_empty());
}
