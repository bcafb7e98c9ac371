#![allow(clippy::unwrap_used, clippy::expect_used)]

use tally_core::errors::{ArchivalStep, NotaryError};
use tally_core::logging_facility::test_capture::init_test_capture;
use tally_core::{log_op_end, log_op_error, log_op_start, log_op_warning};
use tally_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, EVENT_WARNING};

#[test]
fn test_start_and_end_are_captured_once() {
    let capture = init_test_capture();
    let op = "logging_test_start_end";

    log_op_start!(op, account_id = "acct1");
    log_op_end!(op, duration_ms = 42);

    let events = capture.events_for(op);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("account_id"), Some("acct1"));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].field("duration_ms"), Some("42"));
}

#[test]
fn test_error_event_carries_code_and_stage() {
    let capture = init_test_capture();
    let op = "logging_test_error";

    log_op_error!(op, NotaryError::ServerRejected { code: 9 }, duration_ms = 3);

    capture.assert_event_exists(op, EVENT_END_ERROR);
    let event = capture
        .events_for(op)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event");
    assert_eq!(event.field("err.code"), Some("ERR_SERVER_REJECTED"));
    assert_eq!(event.field("stage"), Some("interpret_reply"));
}

#[test]
fn test_warning_event_is_distinct_from_error() {
    let capture = init_test_capture();
    let op = "logging_test_warning";

    log_op_warning!(
        op,
        NotaryError::ArchivalWarning {
            step: ArchivalStep::AccountRefresh,
            reason: "offline".into(),
        }
    );

    capture.assert_event_exists(op, EVENT_WARNING);
    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some(op) && e.event.as_deref() == Some(EVENT_END_ERROR)
    });
    assert_eq!(errors, 0);
}
