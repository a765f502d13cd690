//! SQLite-backed digest records.

use std::path::Path;

use rusqlite::{named_params, Connection, Row};
use serde::Serialize;
use tracing::trace;

use crate::digest::Digests;
use crate::error::Result;

const INSERT_SQL: &str =
    "INSERT OR IGNORE INTO digest VALUES (:name, :md5, :sha1, :crc32, :custom)";

/// One stored candidate and its digests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    pub digests: Digests,
    pub name: String,
}

impl Record {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            digests: Digests {
                md5: row.get(1)?,
                sha1: row.get(2)?,
                crc32: row.get(3)?,
                custom: row.get(4)?,
            },
        })
    }
}

/// The digest table.
///
/// Names are unique and each digest column is unique on its own, so a
/// record colliding with an existing one on any column is dropped whole.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS digest (
                name TEXT PRIMARY KEY,
                md5 TEXT,
                sha1 TEXT,
                crc32 TEXT,
                custom TEXT
            );

            CREATE UNIQUE INDEX IF NOT EXISTS digest_md5 ON digest (md5);
            CREATE UNIQUE INDEX IF NOT EXISTS digest_sha1 ON digest (sha1);
            CREATE UNIQUE INDEX IF NOT EXISTS digest_crc32 ON digest (crc32);
            CREATE UNIQUE INDEX IF NOT EXISTS digest_custom ON digest (custom);
        "#,
        )?;
        Ok(())
    }

    fn insert_on(conn: &Connection, name: &str, digests: &Digests) -> Result<bool> {
        let mut stmt = conn.prepare_cached(INSERT_SQL)?;
        let changed = stmt.execute(named_params! {
            ":name": name,
            ":md5": &digests.md5,
            ":sha1": &digests.sha1,
            ":crc32": &digests.crc32,
            ":custom": &digests.custom,
        })?;
        if changed == 0 {
            trace!("ignored {:?}: name or digest already present", name);
        }
        Ok(changed > 0)
    }

    /// Insert one record. Returns `false` when a uniqueness constraint
    /// rejected it.
    pub fn insert(&self, name: &str, digests: &Digests) -> Result<bool> {
        Self::insert_on(&self.conn, name, digests)
    }

    /// Insert a batch inside one transaction. Returns the number of rows
    /// actually stored.
    pub fn insert_all<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = (String, Digests)>,
    {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        for (name, digests) in records {
            if Self::insert_on(&tx, &name, &digests)? {
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM digest", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Records whose name matches the SQL `LIKE` pattern.
    pub fn find_by_name(&self, pattern: &str) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT name, md5, sha1, crc32, custom FROM digest WHERE name LIKE :name ORDER BY rowid",
        )?;
        let rows = stmt.query_map(named_params! { ":name": pattern }, Record::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Names of records where any digest column equals `value`.
    pub fn find_by_digest(&self, value: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT name FROM digest \
             WHERE md5 = :digest OR sha1 = :digest OR crc32 = :digest OR custom = :digest \
             ORDER BY rowid",
        )?;
        let rows = stmt.query_map(named_params! { ":digest": value }, |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
    }

    /// Close the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}
