//! `showmarkets`

use anyhow::Result;
use clap::Args;
use tally_core::model::MarketList;
use tally_engine::commands::listing_exit_code;
use tally_engine::commands::markets::show_markets;

use super::open_wallet;
use crate::config::Settings;

#[derive(Debug, Args)]
pub struct MarketsArgs {
    #[arg(long)]
    pub server: String,
}

pub fn execute(args: MarketsArgs, settings: &Settings) -> Result<i32> {
    let store = open_wallet(settings)?;
    let list = show_markets(&args.server.into(), &store, &store)?;
    print!("{}", render(&list));
    Ok(listing_exit_code(list.len()))
}

/// Column header; ids are long, so their titles are tab-padded to line up
const HEADER: &str = "Index\tScale\tMarket\t\t\t\t\t\tAsset\t\t\t\t\t\tCurrency\n";

fn render(list: &MarketList) -> String {
    if list.is_empty() {
        return "The market list is empty.\n".to_string();
    }
    let mut out = String::from(HEADER);
    for (i, market) in list.markets.iter().enumerate() {
        out.push_str(&format!(
            "{}\t{}\tM {}\tA {}\tC {}\n",
            i, market.scale, market.market_id, market.instrument_definition_id, market.currency_type_id
        ));
    }
    out
}
