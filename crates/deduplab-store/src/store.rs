use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::migrations::{self, BASE_SCHEMA};
use crate::record::{DuplicateGroup, FileRecord};
use deduplab_classify::ContextTag;

/// Store-open busy timeout, matching the original `sqlite3.connect(..., timeout=30)`.
const OPEN_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (creating if absent) the store at `path`, applying base schema
    /// and any pending migrations. WAL journal mode and `synchronous=NORMAL`
    /// trade a sliver of durability-on-power-loss for write throughput,
    /// matching the original database layer exactly.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(Error::OpenDir)?;
            }
        }

        let mut conn = Connection::open(path).map_err(Error::Open)?;
        conn.busy_timeout(OPEN_TIMEOUT).map_err(Error::Open)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(Error::Open)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(Error::Open)?;

        conn.execute_batch(BASE_SCHEMA).map_err(Error::Open)?;
        migrations::migrate(&mut conn)?;

        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory().map_err(Error::Open)?;
        conn.execute_batch(BASE_SCHEMA).map_err(Error::Open)?;
        migrations::migrate(&mut conn)?;
        Ok(Self { conn })
    }

    /// Inserts or replaces records in a single transaction. Never mutated
    /// incrementally — a rescan always supplies the full, current record.
    pub fn upsert_files(&mut self, records: &[FileRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO files(path, size, mtime, sha256, mime, context_tag)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(path) DO UPDATE SET
                     size=excluded.size,
                     mtime=excluded.mtime,
                     sha256=excluded.sha256,
                     mime=excluded.mime,
                     context_tag=excluded.context_tag",
            )?;
            for record in records {
                stmt.execute(rusqlite::params![
                    record.path,
                    record.size,
                    record.mtime,
                    record.sha256,
                    record.mime,
                    record.context_tag.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Groups by the composite `(sha256, context_tag)` key, filtering groups
    /// of size >= 2. Same hash with a different context tag is never a
    /// duplicate pair (SPEC_FULL.md §C.2 — the `|`-separated form is
    /// authoritative).
    pub fn get_duplicates(&self) -> Result<Vec<DuplicateGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT sha256, context_tag, GROUP_CONCAT(path, '|')
             FROM files
             GROUP BY sha256, context_tag
             HAVING COUNT(*) > 1",
        )?;

        let rows = stmt.query_map([], |row| {
            let sha256: String = row.get(0)?;
            let context_tag: String = row.get(1)?;
            let paths_joined: String = row.get(2)?;
            Ok((sha256, context_tag, paths_joined))
        })?;

        let mut groups = Vec::new();
        for row in rows {
            let (sha256, context_tag, paths_joined) = row?;
            let context_tag: ContextTag = context_tag.parse().unwrap_or(ContextTag::Unarchived);
            let paths = paths_joined.split('|').map(str::to_string).collect();
            groups.push(DuplicateGroup {
                sha256,
                context_tag,
                paths,
            });
        }
        Ok(groups)
    }

    pub fn get_all(&self) -> Result<Vec<FileRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT path, size, mtime, sha256, mime, context_tag FROM files")?;

        let rows = stmt.query_map([], |row| {
            let context_tag: String = row.get(5)?;
            Ok(FileRecord {
                path: row.get(0)?,
                size: row.get(1)?,
                mtime: row.get(2)?,
                sha256: row.get(3)?,
                mime: row.get(4)?,
                context_tag: context_tag.parse().unwrap_or(ContextTag::Unarchived),
            })
        })?;

        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// Records a scan run for audit purposes (SPEC_FULL.md §B.4). Nothing
    /// currently reads this back; it costs one row per scan.
    pub fn record_run(&self, note: &str) -> Result<i64> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        self.conn
            .execute("INSERT INTO runs(ts, note) VALUES (?1, ?2)", rusqlite::params![now, note])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn close(self) {
        drop(self);
    }
}
