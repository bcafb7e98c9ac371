use rusqlite::Connection;

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = Connection::open_in_memory().unwrap();
    tally_store::migrations::apply_migrations(&mut conn).unwrap();

    let tables = table_names(&conn);
    for expected in [
        "schema_version",
        "servers",
        "assets",
        "nyms",
        "accounts",
        "account_snapshots",
        "public_keys",
        "credentials",
        "outpayments",
        "stored_objects",
    ] {
        assert!(tables.contains(&expected.to_string()), "missing table {expected}");
    }
}

#[test]
fn test_migrations_record_checksums() {
    let mut conn = Connection::open_in_memory().unwrap();
    tally_store::migrations::apply_migrations(&mut conn).unwrap();

    let checksums: Vec<String> = {
        let mut stmt = conn
            .prepare("SELECT checksum FROM schema_version ORDER BY id")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    };
    assert_eq!(checksums.len(), 3);
    assert!(checksums.iter().all(|c| c.len() == 64));
}
