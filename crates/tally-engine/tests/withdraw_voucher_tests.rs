// Voucher issuance pipeline against in-memory collaborators.
// Each test checks the outcome and which collaborators were (not) reached.

mod common;

use common::{FakeMessenger, FakeWallet, NotaryMode};
use tally_core::errors::{ArchivalStep, ExErrorKind, NotaryError};
use tally_core::logging_facility::test_capture::init_test_capture;
use tally_core::model::Action;
use tally_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, EVENT_WARNING};
use tally_engine::commands::withdraw_voucher::{
    withdraw_voucher, withdraw_voucher_in, VoucherOutcome, WithdrawVoucherArgs,
};
use tally_core_types::{RequestContext, TraceId};

fn args(account: &str, recipient: &str, amount: &str) -> WithdrawVoucherArgs {
    WithdrawVoucherArgs {
        account: account.into(),
        recipient: recipient.into(),
        amount_text: amount.to_string(),
        memo: Some("for the bike".to_string()),
    }
}

fn failed_kind(outcome: &VoucherOutcome) -> ExErrorKind {
    match outcome {
        VoucherOutcome::Failed { kind, .. } => *kind,
        VoucherOutcome::Issued { .. } => panic!("expected failure, voucher was issued"),
    }
}

#[test]
fn test_scenario_a_issues_voucher_and_archives_it() {
    let wallet = FakeWallet::scenario();
    let messenger = FakeMessenger::new(NotaryMode::Issue);

    let outcome = withdraw_voucher(args("acct1", "nymB", "500"), &wallet, &messenger);

    let VoucherOutcome::Issued {
        instrument,
        warnings,
    } = &outcome
    else {
        panic!("expected issuance, got {outcome:?}");
    };
    assert!(warnings.is_empty());
    assert_eq!(instrument.voucher().recipient.as_str(), "nymB");
    assert_eq!(instrument.voucher().issuer_account.as_str(), "acct1");
    assert_eq!(instrument.voucher().amount, 50_000);
    assert_eq!(outcome.exit_code(), 1);

    assert_eq!(messenger.submit_calls(), 1);
    assert_eq!(messenger.deliver_calls(), 1);
    assert_eq!(messenger.refresh_calls(), 1);
    assert_eq!(*messenger.refreshed_with_force.lock().unwrap(), vec![true]);

    let submitted = messenger.submitted.lock().unwrap();
    assert_eq!(submitted[0].server().as_str(), "srv1");
    assert_eq!(submitted[0].nym().as_str(), "nymA");
    match submitted[0].action() {
        Action::WithdrawVoucher { amount, memo, .. } => {
            assert_eq!(*amount, 50_000);
            assert_eq!(memo.as_ref().map(|m| m.expose().as_str()), Some("for the bike"));
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn test_scenario_b_malformed_amount_builds_no_request() {
    let wallet = FakeWallet::scenario();
    let messenger = FakeMessenger::new(NotaryMode::Issue);

    for amount in ["abc", "-5", "+5"] {
        let outcome = withdraw_voucher(args("acct1", "nymB", amount), &wallet, &messenger);
        assert_eq!(failed_kind(&outcome), ExErrorKind::MalformedAmount, "{amount}");
        assert!(outcome.exit_code() < 0);
    }
    assert_eq!(messenger.key_calls(), 0);
    assert_eq!(messenger.submit_calls(), 0);
}

#[test]
fn test_out_of_range_amount_never_reaches_key_check() {
    let wallet = FakeWallet::scenario();
    let messenger = FakeMessenger::new(NotaryMode::Issue);

    for amount in ["0", "1.234"] {
        let outcome = withdraw_voucher(args("acct1", "nymB", amount), &wallet, &messenger);
        assert_eq!(failed_kind(&outcome), ExErrorKind::AmountOutOfRange, "{amount}");
    }
    assert_eq!(messenger.key_calls(), 0);
}

#[test]
fn test_scenario_c_missing_key_sends_nothing() {
    let wallet = FakeWallet::scenario();
    let messenger = FakeMessenger::new(NotaryMode::Issue);

    let outcome = withdraw_voucher(args("acct1", "nymC", "500"), &wallet, &messenger);

    assert_eq!(failed_kind(&outcome), ExErrorKind::KeyUnavailable);
    if let VoucherOutcome::Failed { detail, .. } = &outcome {
        assert_eq!(detail.input(), Some("nymC"));
    }
    assert_eq!(messenger.key_calls(), 1);
    assert_eq!(messenger.submit_calls(), 0);
    assert_eq!(messenger.deliver_calls(), 0);
}

#[test]
fn test_scenario_d_server_rejection_yields_no_instrument() {
    let wallet = FakeWallet::scenario();
    let messenger = FakeMessenger::new(NotaryMode::Reject(3));

    let outcome = withdraw_voucher(args("acct1", "nymB", "500"), &wallet, &messenger);

    assert_eq!(failed_kind(&outcome), ExErrorKind::ServerRejected);
    assert!(outcome.instrument().is_none());
    if let VoucherOutcome::Failed { detail, .. } = &outcome {
        assert_eq!(detail.server_code(), Some(3));
        assert!(detail.request_id().is_some());
    }
    assert_eq!(messenger.deliver_calls(), 0);
    assert_eq!(messenger.refresh_calls(), 0);
}

#[test]
fn test_invalid_identifiers_never_submit() {
    let wallet = FakeWallet::scenario().with_orphan_account("acct7");
    let messenger = FakeMessenger::new(NotaryMode::Issue);

    let cases = [
        (args("acct9", "nymB", "500"), "myacct"),
        (args("", "nymB", "500"), "myacct"),
        (args("acct1", "", "500"), "hisnym"),
        (args("acct1", "nym B", "500"), "hisnym"),
        (args("acct7", "nymB", "500"), "server"),
    ];

    for (input, role) in cases {
        let outcome = withdraw_voucher(input, &wallet, &messenger);
        assert_eq!(failed_kind(&outcome), ExErrorKind::InvalidIdentifier);
        if let VoucherOutcome::Failed { detail, .. } = &outcome {
            assert_eq!(detail.role(), Some(role));
            assert_eq!(detail.op(), Some("validate_identifier"));
        }
    }

    assert_eq!(messenger.key_calls(), 0);
    assert_eq!(messenger.submit_calls(), 0);
}

#[test]
fn test_empty_ledger_is_malformed_reply() {
    let wallet = FakeWallet::scenario();
    for mode in [NotaryMode::EmptyLedger, NotaryMode::NoLedger] {
        let messenger = FakeMessenger::new(mode);
        let outcome = withdraw_voucher(args("acct1", "nymB", "500"), &wallet, &messenger);
        assert_eq!(failed_kind(&outcome), ExErrorKind::MalformedReply);
        assert_eq!(messenger.deliver_calls(), 0);
    }
}

#[test]
fn test_transport_failure_and_uncorrelated_reply() {
    let wallet = FakeWallet::scenario();

    let down = FakeMessenger::new(NotaryMode::Unreachable);
    let outcome = withdraw_voucher(args("acct1", "nymB", "500"), &wallet, &down);
    assert_eq!(failed_kind(&outcome), ExErrorKind::TransportFailure);
    if let VoucherOutcome::Failed { detail, .. } = &outcome {
        assert!(detail.source_error().is_some());
    }

    let stray = FakeMessenger::new(NotaryMode::Uncorrelated);
    let outcome = withdraw_voucher(args("acct1", "nymB", "500"), &wallet, &stray);
    assert_eq!(failed_kind(&outcome), ExErrorKind::TransportFailure);
    assert_eq!(stray.deliver_calls(), 0);
}

#[test]
fn test_undecodable_reply_stays_malformed() {
    let wallet = FakeWallet::scenario();
    let messenger = FakeMessenger::new(NotaryMode::Garbled);

    let outcome = withdraw_voucher(args("acct1", "nymB", "500"), &wallet, &messenger);

    assert_eq!(failed_kind(&outcome), ExErrorKind::MalformedReply);
    if let VoucherOutcome::Failed { detail, .. } = &outcome {
        assert!(detail.request_id().is_some());
        assert!(detail.source_error().is_some());
    }
    assert_eq!(messenger.deliver_calls(), 0);
}

#[test]
fn test_archival_failures_are_warnings_not_failures() {
    let wallet = FakeWallet::scenario();
    let mut messenger = FakeMessenger::new(NotaryMode::Issue);
    messenger.fail_deliver = true;
    messenger.fail_refresh = true;

    let outcome = withdraw_voucher(args("acct1", "nymB", "500"), &wallet, &messenger);

    let VoucherOutcome::Issued { warnings, .. } = &outcome else {
        panic!("archival problems must not fail an issued voucher");
    };
    assert_eq!(outcome.exit_code(), 1);
    let steps: Vec<ArchivalStep> = warnings
        .iter()
        .map(|w| match w {
            NotaryError::ArchivalWarning { step, .. } => *step,
            other => panic!("unexpected warning {other:?}"),
        })
        .collect();
    assert_eq!(steps, vec![ArchivalStep::SelfArchival, ArchivalStep::AccountRefresh]);
    // Refresh still runs after self-archival fails
    assert_eq!(messenger.refresh_calls(), 1);
}

#[test]
fn test_pipeline_logs_start_end_and_warnings() {
    let capture = init_test_capture();
    let trace = TraceId::from_string("trace-log-success");
    let ctx = RequestContext::with_trace_id(trace);
    let wallet = FakeWallet::scenario();
    let mut messenger = FakeMessenger::new(NotaryMode::Issue);
    messenger.fail_refresh = true;

    withdraw_voucher_in(&ctx, args("acct1", "nymB", "500"), &wallet, &messenger);

    let start = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_START) && e.field("trace_id") == Some("trace-log-success")
    });
    assert_eq!(start, 1);
    capture.assert_event_exists("withdraw_voucher", EVENT_END);
    capture.assert_event_exists("withdraw_voucher", EVENT_WARNING);
}

#[test]
fn test_pipeline_logs_error_with_stage() {
    let capture = init_test_capture();
    let wallet = FakeWallet::scenario();
    let messenger = FakeMessenger::new(NotaryMode::Reject(41));

    withdraw_voucher(args("acct1", "nymB", "500"), &wallet, &messenger);

    let rejected = capture.count_events(|e| {
        e.op.as_deref() == Some("withdraw_voucher")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_SERVER_REJECTED")
            && e.field("stage") == Some("interpret_reply")
    });
    assert!(rejected >= 1);
}
