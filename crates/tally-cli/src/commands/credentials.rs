//! `showcredentials`

use anyhow::Result;
use clap::Args;
use tally_core::model::{Credential, NymCredentials};
use tally_engine::commands::credentials::show_credentials;
use tally_engine::commands::listing_exit_code;

use super::open_wallet;
use crate::config::Settings;

#[derive(Debug, Args)]
pub struct CredentialsArgs {
    #[arg(long)]
    pub mynym: String,
}

pub fn execute(args: CredentialsArgs, settings: &Settings) -> Result<i32> {
    let store = open_wallet(settings)?;
    let listing = show_credentials(&args.mynym.into(), &store, &store)?;
    print!("{}", render(&listing));
    Ok(listing_exit_code(listing.total()))
}

fn render(listing: &NymCredentials) -> String {
    let mut out = String::new();
    section(&mut out, &listing.active, "");
    section(&mut out, &listing.revoked, "Revoked ");
    out
}

fn section(out: &mut String, credentials: &[Credential], label: &str) {
    if credentials.is_empty() {
        out.push_str(&format!("The {}credential list is empty.\n", label.to_lowercase()));
        return;
    }

    out.push_str(&format!("Idx     {label}Credential ID\n---------------------------\n"));
    for (i, credential) in credentials.iter().enumerate() {
        out.push_str(&format!("{i}:      {}\n", credential.id));
        if credential.subcredentials.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "        ---------------------------\n        Idx     {label}Subcredential ID\n        ---------------------------\n"
        ));
        for (j, sub) in credential.subcredentials.iter().enumerate() {
            out.push_str(&format!("        {j}:      {sub}\n"));
        }
    }
}
