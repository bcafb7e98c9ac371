//! Master credentials and their subcredentials

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use tally_core::model::{Credential, Identifier, NymCredentials};

pub struct CredentialRepo;

impl CredentialRepo {
    /// Store a master credential with its subcredentials in one transaction
    pub fn add(conn: &mut Connection, nym: &Identifier, credential: &Credential, revoked: bool) -> Result<()> {
        let now = Utc::now().timestamp_millis();
        let tx = conn.transaction().map_err(from_rusqlite)?;

        tx.execute(
            "INSERT INTO credentials (id, nym_id, master_id, revoked, created_at)
             VALUES (?1, ?2, NULL, ?3, ?4)",
            params![credential.id, nym.as_str(), revoked, now],
        )
        .map_err(from_rusqlite)?;

        for sub in &credential.subcredentials {
            tx.execute(
                "INSERT INTO credentials (id, nym_id, master_id, revoked, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![sub, nym.as_str(), credential.id, revoked, now],
            )
            .map_err(from_rusqlite)?;
        }

        tx.commit().map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn list(conn: &Connection, nym: &Identifier) -> Result<NymCredentials> {
        let mut stmt = conn
            .prepare(
                "SELECT id, master_id, revoked FROM credentials
                 WHERE nym_id = ?1
                 ORDER BY created_at, id",
            )
            .map_err(from_rusqlite)?;

        let rows: Vec<(String, Option<String>, bool)> = stmt
            .query_map([nym.as_str()], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        let mut listing = NymCredentials::default();
        for (id, master, revoked) in &rows {
            if master.is_some() {
                continue;
            }
            let credential = Credential {
                id: id.clone(),
                subcredentials: rows
                    .iter()
                    .filter(|(_, m, _)| m.as_deref() == Some(id.as_str()))
                    .map(|(sub, _, _)| sub.clone())
                    .collect(),
            };
            if *revoked {
                listing.revoked.push(credential);
            } else {
                listing.active.push(credential);
            }
        }

        Ok(listing)
    }
}
