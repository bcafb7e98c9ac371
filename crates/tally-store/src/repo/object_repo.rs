//! Typed objects stored as tagged JSON under (kind, server, name)

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, serialization_error, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tally_core::errors::{ExError, ExErrorKind};
use tally_core::model::{Identifier, StoredObject, StoredObjectKind};

pub struct ObjectRepo;

impl ObjectRepo {
    pub fn put(conn: &Connection, server: &Identifier, name: &str, object: &StoredObject) -> Result<()> {
        let data = serde_json::to_string(object).map_err(|e| serialization_error("put_object", e))?;
        conn.execute(
            "INSERT INTO stored_objects (kind, server_id, name, data, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(kind, server_id, name) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at",
            params![
                object.kind().as_str(),
                server.as_str(),
                name,
                data,
                Utc::now().timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn exists(conn: &Connection, kind: StoredObjectKind, server: &Identifier, name: &str) -> Result<bool> {
        let found = conn
            .query_row(
                "SELECT 1 FROM stored_objects WHERE kind = ?1 AND server_id = ?2 AND name = ?3",
                params![kind.as_str(), server.as_str(), name],
                |_| Ok(()),
            )
            .optional()
            .map_err(from_rusqlite)?;
        Ok(found.is_some())
    }

    /// Load the object stored under `(kind, server, name)`
    ///
    /// The decoded variant must agree with `kind`; a row whose payload decodes
    /// to another variant is reported as a serialization error.
    pub fn get(
        conn: &Connection,
        kind: StoredObjectKind,
        server: &Identifier,
        name: &str,
    ) -> Result<Option<StoredObject>> {
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM stored_objects WHERE kind = ?1 AND server_id = ?2 AND name = ?3",
                params![kind.as_str(), server.as_str(), name],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        let Some(data) = data else {
            return Ok(None);
        };

        let object: StoredObject =
            serde_json::from_str(&data).map_err(|e| serialization_error("query_object", e))?;
        if object.kind() != kind {
            return Err(ExError::new(ExErrorKind::Serialization)
                .with_op("query_object")
                .with_message(format!(
                    "object {}/{} holds {} data",
                    kind.as_str(),
                    name,
                    object.kind().as_str()
                )));
        }
        Ok(Some(object))
    }
}
