//! Outpayments: locally kept copies of issued instruments
//!
//! At most one row per instrument. Archiving an instrument that is already
//! present replaces the row, so a repeated self-archival is a no-op and a
//! later delivery to a third party supersedes the self-addressed copy.

#![allow(clippy::result_large_err)]

use super::{from_millis, to_millis};
use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tally_core::model::{Identifier, InstrumentId, LocalRecord};

pub struct OutpaymentRepo;

impl OutpaymentRepo {
    /// Insert or replace the record for `record.instrument_id`
    pub fn archive(conn: &Connection, record: &LocalRecord) -> Result<()> {
        conn.execute(
            "INSERT INTO outpayments
                (instrument_id, owner_nym, server_id, recipient, payload, archived_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(instrument_id) DO UPDATE SET
                owner_nym = excluded.owner_nym,
                server_id = excluded.server_id,
                recipient = excluded.recipient,
                payload = excluded.payload,
                archived_at = excluded.archived_at",
            params![
                record.instrument_id.as_str(),
                record.owner_nym.as_str(),
                record.server.as_str(),
                record.recipient.as_str(),
                record.payload,
                to_millis(record.archived_at),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get(conn: &Connection, instrument_id: &InstrumentId) -> Result<Option<LocalRecord>> {
        conn.query_row(
            "SELECT instrument_id, owner_nym, server_id, recipient, payload, archived_at
             FROM outpayments WHERE instrument_id = ?1",
            [instrument_id.as_str()],
            map_record,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// All records owned by `owner` on `server`, oldest first
    pub fn list(conn: &Connection, server: &Identifier, owner: &Identifier) -> Result<Vec<LocalRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT instrument_id, owner_nym, server_id, recipient, payload, archived_at
                 FROM outpayments
                 WHERE server_id = ?1 AND owner_nym = ?2
                 ORDER BY archived_at, id",
            )
            .map_err(from_rusqlite)?;

        let records = stmt
            .query_map([server.as_str(), owner.as_str()], map_record)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(records)
    }

    pub fn count(conn: &Connection, server: &Identifier, owner: &Identifier) -> Result<usize> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM outpayments WHERE server_id = ?1 AND owner_nym = ?2",
                [server.as_str(), owner.as_str()],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(count as usize)
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<LocalRecord> {
    Ok(LocalRecord {
        instrument_id: InstrumentId::from_string(row.get::<_, String>(0)?),
        owner_nym: Identifier::new(row.get::<_, String>(1)?),
        server: Identifier::new(row.get::<_, String>(2)?),
        recipient: Identifier::new(row.get::<_, String>(3)?),
        payload: row.get(4)?,
        archived_at: from_millis(5, row.get(5)?)?,
    })
}
