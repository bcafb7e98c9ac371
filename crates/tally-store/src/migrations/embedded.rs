//! Embedded SQL migrations, in application order

pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_wallet_schema",
            sql: include_str!("../../migrations/001_wallet_schema.sql"),
        },
        Migration {
            id: "002_outpayments",
            sql: include_str!("../../migrations/002_outpayments.sql"),
        },
        Migration {
            id: "003_stored_objects",
            sql: include_str!("../../migrations/003_stored_objects.sql"),
        },
    ]
}
