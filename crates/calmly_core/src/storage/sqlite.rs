//! SQLite-backed state store.
//!
//! # Responsibility
//! - Open and bootstrap SQLite connections for the key-value store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - A store is never usable before its migrations succeed.
//! - A database written by a newer schema version is rejected, not guessed at.

use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

use super::{StateStore, StorageError, StorageResult};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "CREATE TABLE entries (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
}];

/// SQLite implementation of the state store port.
pub struct SqliteStateStore {
    conn: Connection,
}

impl SqliteStateStore {
    /// Opens a database file and applies all pending migrations.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        let result = Connection::open(path)
            .map_err(StorageError::from)
            .and_then(Self::bootstrap);
        log_open("file", started_at, &result);
        result
    }

    /// Opens an in-memory database and applies all pending migrations.
    pub fn open_in_memory() -> StorageResult<Self> {
        let started_at = Instant::now();
        let result = Connection::open_in_memory()
            .map_err(StorageError::from)
            .and_then(Self::bootstrap);
        log_open("memory", started_at, &result);
        result
    }

    fn bootstrap(mut conn: Connection) -> StorageResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }
}

impl StateStore for SqliteStateStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM entries WHERE key = ?1;")?;
        let value = stmt
            .query_row([key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO entries (key, value) VALUES (?1, ?2);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> StorageResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn log_open(mode: &str, started_at: Instant, result: &StorageResult<SqliteStateStore>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event=store_open module=storage status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=store_open module=storage status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{latest_version, SqliteStateStore};
    use crate::storage::StateStore;

    #[test]
    fn read_of_missing_key_is_none() {
        let store = SqliteStateStore::open_in_memory().unwrap();
        assert_eq!(store.read("calmly_notes").unwrap(), None);
    }

    #[test]
    fn write_replaces_previous_value() {
        let mut store = SqliteStateStore::open_in_memory().unwrap();
        store.write("calmly_theme", "Beige").unwrap();
        store.write("calmly_theme", "Midnight").unwrap();
        assert_eq!(
            store.read("calmly_theme").unwrap().as_deref(),
            Some("Midnight")
        );
    }

    #[test]
    fn latest_version_is_nonzero() {
        assert!(latest_version() >= 1);
    }
}
