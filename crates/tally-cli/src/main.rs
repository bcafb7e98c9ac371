//! Tally CLI
//!
//! Command-line client for a notary: issues vouchers and lists what the
//! local wallet knows.

use clap::{Parser, Subcommand};

mod commands;
mod config;

use config::{GlobalArgs, Settings};

#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "Tally - notarized instrument client", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Withdraw from myacct as a voucher payable to hisnym
    #[command(name = "withdrawvoucher")]
    WithdrawVoucher(commands::withdraw::WithdrawArgs),
    /// Show the list of markets
    #[command(name = "showmarkets")]
    ShowMarkets(commands::markets::MarketsArgs),
    /// Show mynym's credentials
    #[command(name = "showcredentials")]
    ShowCredentials(commands::credentials::CredentialsArgs),
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load(&cli.global) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(commands::EXIT_FAILURE);
        }
    };
    tally_core::logging_facility::init(settings.log_profile);

    let result = match cli.command {
        Commands::WithdrawVoucher(args) => commands::withdraw::execute(args, &settings),
        Commands::ShowMarkets(args) => commands::markets::execute(args, &settings),
        Commands::ShowCredentials(args) => commands::credentials::execute(args, &settings),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(commands::EXIT_FAILURE);
        }
    }
}
