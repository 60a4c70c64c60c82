//! Persistent state storage port.
//!
//! # Responsibility
//! - Define the key-value contract the journal persists through.
//! - Keep backend details (SQLite, memory) behind one trait.
//!
//! # Invariants
//! - Reads and writes are synchronous and whole-value.
//! - A missing key is `Ok(None)`, never an error.
//! - Writes replace the full value for a key; last write wins.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStateStore;
pub use sqlite::SqliteStateStore;

/// Storage keys for each persisted collection.
///
/// The names match the original snapshot blobs, so existing stored state
/// stays readable.
pub mod keys {
    pub const NOTES: &str = "calmly_notes";
    pub const PRIORITIES: &str = "calmly_priorities";
    pub const MOODS: &str = "calmly_moods";
    pub const BOARD: &str = "calmly_board";
    pub const RITUALS: &str = "calmly_rituals";
    pub const THEME: &str = "calmly_theme";
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend error.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key-value port the journal persists through.
pub trait StateStore {
    /// Reads the stored value for `key`, if any.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
