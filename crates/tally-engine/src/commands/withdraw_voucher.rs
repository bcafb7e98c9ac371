//! Voucher issuance pipeline
//!
//! ## Stages (in order, first failure wins):
//! 1. Identifier validation (account, counterparty, derived server and owner)
//! 2. Amount parsing against the account's asset
//! 3. Counterparty key availability
//! 4. Submission (one round trip, reply must decode and answer this request)
//! 5. Reply interpretation
//! 6. Local archival (best effort: failures become warnings)
//!
//! Stages 1-3 never touch the notary, so a failure there spends no
//! transaction number. Once stage 5 succeeds the notary has committed the
//! withdrawal; nothing after that can turn the outcome into a failure.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use tally_core::errors::{ArchivalStep, ExError, ExErrorKind, NotaryError, Stage};
use tally_core::interpret::interpret_withdrawal;
use tally_core::model::{Identifier, IdentifierRole, Instrument, Reply, Request};
use tally_core::outcome::PostCommit;
use tally_core::ports::{Messenger, WalletResolver};
use tally_core::rules::{account_context, parse_amount, validate_identifier};
use tally_core::{log_op_end, log_op_error, log_op_start, log_op_warning};
use tally_core_types::{RequestContext, TraceId};

use super::{EXIT_FAILURE, EXIT_PRODUCED};

const OP: &str = "withdraw_voucher";

/// Caller-supplied inputs, as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawVoucherArgs {
    pub account: Identifier,
    pub recipient: Identifier,
    pub amount_text: String,
    pub memo: Option<String>,
}

/// Final result of one issuance attempt
#[derive(Debug, Clone)]
pub enum VoucherOutcome {
    /// The notary issued the voucher. Warnings mean local bookkeeping may be
    /// stale; the voucher itself is valid.
    Issued {
        instrument: Instrument,
        warnings: Vec<NotaryError>,
    },
    Failed {
        kind: ExErrorKind,
        detail: ExError,
    },
}

impl VoucherOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            VoucherOutcome::Issued { .. } => EXIT_PRODUCED,
            VoucherOutcome::Failed { .. } => EXIT_FAILURE,
        }
    }

    pub fn is_issued(&self) -> bool {
        matches!(self, VoucherOutcome::Issued { .. })
    }

    pub fn instrument(&self) -> Option<&Instrument> {
        match self {
            VoucherOutcome::Issued { instrument, .. } => Some(instrument),
            VoucherOutcome::Failed { .. } => None,
        }
    }
}

/// Issue a voucher drawn on `args.account`, payable to `args.recipient`
pub fn withdraw_voucher(
    args: WithdrawVoucherArgs,
    resolver: &dyn WalletResolver,
    messenger: &dyn Messenger,
) -> VoucherOutcome {
    withdraw_voucher_in(&RequestContext::new(), args, resolver, messenger)
}

/// Same as [`withdraw_voucher`], continuing the caller's trace
pub fn withdraw_voucher_in(
    ctx: &RequestContext,
    args: WithdrawVoucherArgs,
    resolver: &dyn WalletResolver,
    messenger: &dyn Messenger,
) -> VoucherOutcome {
    log_op_start!(
        OP,
        account_id = args.account.as_str(),
        recipient_id = args.recipient.as_str(),
        trace_id = ctx.trace_id.as_str()
    );
    let start = Instant::now();

    match withdraw_voucher_impl(ctx, &args, resolver, messenger) {
        Ok(issued) => {
            for warning in &issued.warnings {
                log_op_warning!(OP, warning.clone());
            }
            log_op_end!(
                OP,
                duration_ms = start.elapsed().as_millis() as u64,
                instrument_id = issued.value.id().as_str(),
                warnings = issued.warnings.len()
            );
            VoucherOutcome::Issued {
                instrument: issued.value,
                warnings: issued.warnings,
            }
        }
        Err(err) => {
            let err = err.with_trace_id(ctx.trace_id.clone());
            log_op_error!(
                OP,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            VoucherOutcome::Failed {
                kind: err.kind(),
                detail: err,
            }
        }
    }
}

fn withdraw_voucher_impl(
    ctx: &RequestContext,
    args: &WithdrawVoucherArgs,
    resolver: &dyn WalletResolver,
    messenger: &dyn Messenger,
) -> Result<PostCommit<Instrument>, ExError> {
    validate_identifier(resolver, IdentifierRole::MyAccount, &args.account)?;
    validate_identifier(resolver, IdentifierRole::HisNym, &args.recipient)?;
    let (server, nym) = account_context(resolver, &args.account)?;
    stage_passed(Stage::ValidateIdentifier, &ctx.trace_id);

    let asset = resolver
        .account_asset(&args.account)
        .ok_or_else(|| NotaryError::InvalidIdentifier {
            role: IdentifierRole::MyAccount,
            id: args.account.as_str().to_string(),
        })?;
    let amount = parse_amount(&args.amount_text, &asset)?;
    stage_passed(Stage::ParseAmount, &ctx.trace_id);

    check_key(messenger, &server, &nym, &args.recipient)?;
    stage_passed(Stage::CheckKey, &ctx.trace_id);

    let request = Request::withdraw_voucher(
        ctx.next_request_id(),
        server.clone(),
        nym.clone(),
        args.account.clone(),
        args.recipient.clone(),
        amount,
        args.memo.clone(),
    );
    let reply = submit(messenger, &request)?;
    stage_passed(Stage::Submit, &ctx.trace_id);

    let instrument = interpret_withdrawal(&reply)
        .map_err(|e| ExError::from(e).with_request_id(request.request_id().clone()))?;
    stage_passed(Stage::InterpretReply, &ctx.trace_id);

    Ok(archive(messenger, &server, &nym, &args.account, instrument))
}

fn stage_passed(stage: Stage, trace_id: &TraceId) {
    tracing::debug!(op = OP, stage = stage.as_str(), trace_id = trace_id.as_str(), "stage passed");
}

/// The counterparty's encryption key must be at hand before a transaction
/// number is spent on a voucher they could not receive
fn check_key(
    messenger: &dyn Messenger,
    server: &Identifier,
    nym: &Identifier,
    recipient: &Identifier,
) -> Result<(), ExError> {
    let unavailable = || {
        ExError::from(NotaryError::KeyUnavailable {
            nym: recipient.as_str().to_string(),
        })
    };

    match messenger.load_or_retrieve_key(server, nym, recipient) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(unavailable()),
        Err(e) => Err(unavailable().with_source(e)),
    }
}

fn submit(messenger: &dyn Messenger, request: &Request) -> Result<Reply, ExError> {
    let request_id = request.request_id().clone();
    let transport = |reason: String| {
        ExError::from(NotaryError::TransportFailure { reason }).with_request_id(request_id.clone())
    };

    // A reply that arrived but does not decode is the notary's fault, not the
    // network's.
    let reply = messenger.submit(request).map_err(|e| match e.kind() {
        ExErrorKind::MalformedReply => ExError::from(NotaryError::MalformedReply {
            reason: e.message().to_string(),
        })
        .with_request_id(request_id.clone())
        .with_source(e),
        _ => transport(e.message().to_string()).with_source(e),
    })?;

    if reply.request_id != request_id {
        return Err(transport(format!(
            "reply answers request {} instead of {}",
            reply.request_id, request_id
        )));
    }

    Ok(reply)
}

/// Keep a self-addressed copy, then resync the account. Both always run.
fn archive(
    messenger: &dyn Messenger,
    server: &Identifier,
    nym: &Identifier,
    account: &Identifier,
    instrument: Instrument,
) -> PostCommit<Instrument> {
    let mut outcome = PostCommit::new(instrument);

    let delivered = messenger.deliver_self(server, nym, &outcome.value);
    outcome.note(ArchivalStep::SelfArchival, delivered);

    let refreshed = messenger.refresh_account(server, nym, account, true);
    outcome.note(ArchivalStep::AccountRefresh, refreshed);

    outcome
}
