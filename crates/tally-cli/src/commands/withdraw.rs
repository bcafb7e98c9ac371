//! `withdrawvoucher`

use anyhow::Result;
use clap::Args;
use tally_engine::commands::engine_command::{
    apply_engine_command, Collaborators, EngineCommand, EngineCommandResult,
};
use tally_engine::commands::withdraw_voucher::{VoucherOutcome, WithdrawVoucherArgs};
use tally_engine::transport::HttpMessenger;

use super::open_wallet;
use crate::config::Settings;

#[derive(Debug, Args)]
pub struct WithdrawArgs {
    /// Account to draw the voucher on
    #[arg(long)]
    pub myacct: String,

    /// Nym the voucher is payable to
    #[arg(long)]
    pub hisnym: String,

    /// Amount in the account's asset, e.g. 5.25
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    #[arg(long)]
    pub memo: Option<String>,
}

pub fn execute(args: WithdrawArgs, settings: &Settings) -> Result<i32> {
    let store = open_wallet(settings)?;
    let messenger = HttpMessenger::new(settings.notary_url.clone(), settings.timeout, store.clone())?;

    let cmd = EngineCommand::WithdrawVoucher(WithdrawVoucherArgs {
        account: args.myacct.into(),
        recipient: args.hisnym.into(),
        amount_text: args.amount,
        memo: args.memo,
    });
    let deps = Collaborators {
        resolver: &store,
        messenger: &messenger,
        objects: &store,
        credentials: &store,
    };

    let result = apply_engine_command(cmd, &deps)?;
    let code = result.exit_code();
    if let EngineCommandResult::Voucher(outcome) = result {
        report(&outcome);
    }
    Ok(code)
}

fn report(outcome: &VoucherOutcome) {
    match outcome {
        VoucherOutcome::Issued {
            instrument,
            warnings,
        } => {
            println!("{}", instrument.armored());
            for warning in warnings {
                eprintln!("Warning: {}", warning);
            }
            if !warnings.is_empty() {
                eprintln!(
                    "The voucher is valid, but local bookkeeping may be stale until the next account refresh."
                );
            }
        }
        VoucherOutcome::Failed { detail, .. } => {
            eprintln!("Error: {}", detail);
        }
    }
}
