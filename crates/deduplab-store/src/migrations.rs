use rusqlite::Connection;

use crate::error::{Error, Result};

/// Base schema (v0) — present on every fresh database before migrations run.
pub const BASE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS files(
  path TEXT PRIMARY KEY,
  size INTEGER NOT NULL,
  mtime INTEGER NOT NULL,
  sha256 TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sha ON files(sha256);
CREATE TABLE IF NOT EXISTS runs(
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  ts INTEGER NOT NULL,
  note TEXT
);
";

struct Migration {
    version: i64,
    sql: &'static str,
    description: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: "ALTER TABLE files ADD COLUMN mime TEXT DEFAULT 'application/octet-stream';",
        description: "add mime column",
    },
    Migration {
        version: 2,
        sql: "ALTER TABLE files ADD COLUMN context_tag TEXT DEFAULT 'unarchived';",
        description: "add context_tag column",
    },
    Migration {
        version: 3,
        sql: "CREATE INDEX IF NOT EXISTS idx_files_hash_ctx ON files (sha256, context_tag);",
        description: "composite hash+context index",
    },
    Migration {
        version: 4,
        sql: "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL,
            description TEXT
        );",
        description: "schema_version tracking table",
    },
];

fn current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i64>>(0)
    })
    .ok()
    .flatten()
    .unwrap_or(0)
}

/// Applies all migrations `> current_version` in ascending order, each
/// within its own transaction. `schema_version` itself is created by
/// migration 4; versions below 4 can only be recorded retroactively, so on
/// a fresh database all four migrations run but only v4 is self-recording —
/// this backfills v1-v3 at that moment (SPEC_FULL.md §C.3) so the table
/// reflects full history immediately rather than only from the next reopen.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let current = current_version(conn);
    let now = now_unix();

    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }

        let tx = conn.transaction().map_err(|source| Error::Migration {
            version: migration.version,
            source,
        })?;

        tx.execute_batch(migration.sql)
            .map_err(|source| Error::Migration {
                version: migration.version,
                source,
            })?;

        if migration.version >= 4 {
            tx.execute(
                "INSERT INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
                rusqlite::params![migration.version, now, migration.description],
            )
            .map_err(|source| Error::Migration {
                version: migration.version,
                source,
            })?;

            if migration.version == 4 {
                for backfill in MIGRATIONS.iter().filter(|m| m.version < 4) {
                    tx.execute(
                        "INSERT INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
                        rusqlite::params![backfill.version, now, "backfilled"],
                    )
                    .map_err(|source| Error::Migration {
                        version: backfill.version,
                        source,
                    })?;
                }
            }
        }

        tx.commit().map_err(|source| Error::Migration {
            version: migration.version,
            source,
        })?;

        tracing::debug!(version = migration.version, "applied schema migration");
    }

    Ok(())
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_ends_at_latest_version_with_full_history() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(BASE_SCHEMA).unwrap();
        migrate(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 4);

        let cols: Vec<String> = conn
            .prepare("PRAGMA table_info(files)")
            .unwrap()
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert!(cols.contains(&"mime".to_string()));
        assert!(cols.contains(&"context_tag".to_string()));
    }

    #[test]
    fn rerunning_migrate_is_a_no_op() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(BASE_SCHEMA).unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 4);
    }
}
