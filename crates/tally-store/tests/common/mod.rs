#![allow(dead_code)]

use chrono::{Duration, Utc};
use tally_core::model::{Asset, Identifier, Instrument, Voucher};
use tally_store::WalletStore;

/// Wallet with srv1, nymA, asset usd (2 decimals) and acct1 owned by nymA
pub fn seeded_store() -> WalletStore {
    let store = WalletStore::open_in_memory().expect("open store");
    store
        .add_server(&"srv1".into(), "Main notary", "http://localhost:7085")
        .unwrap();
    store.add_nym(&"nymA".into(), "Alice").unwrap();
    store
        .add_asset(&Asset::new("usd", "US Dollar", 2).with_symbol("$"))
        .unwrap();
    store
        .add_account(&"acct1".into(), &"srv1".into(), &"nymA".into(), &"usd".into())
        .unwrap();
    store
}

pub fn instrument(recipient: &str, transaction_number: i64) -> Instrument {
    let now = Utc::now();
    Instrument::from_voucher(Voucher {
        server: "srv1".into(),
        asset: "usd".into(),
        issuer_nym: "nymA".into(),
        issuer_account: "acct1".into(),
        recipient: Identifier::new(recipient),
        amount: 50_000,
        transaction_number,
        memo: None,
        valid_from: now,
        valid_to: now + Duration::days(180),
        signature: "sig".to_string(),
    })
    .expect("armor voucher")
}
