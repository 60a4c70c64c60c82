//! Journal state container.
//!
//! # Responsibility
//! - Own every persisted collection plus the selected theme.
//! - Load state read-once at startup with per-key fallback to defaults.
//! - Write the owning collection back through the storage port after every
//!   mutation.
//!
//! # Invariants
//! - Each collection has exactly one mutation entry point set (this type).
//! - Startup never fails: unreadable or corrupt entries fall back to
//!   defaults without disturbing healthy keys.
//! - Persistence is whole-collection write-through; last write wins per key.

mod board;
mod notes;
mod planner;
mod rituals;

use log::{info, warn};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::model::board::{default_board, MoodBoardItem};
use crate::model::note::{Note, NoteId};
use crate::model::planner::{MoodEntry, Priority};
use crate::model::ritual::{default_rituals, Ritual};
use crate::model::theme::ThemeName;
use crate::storage::{keys, StateStore, StorageError};

pub type JournalResult<T> = Result<T, JournalError>;

/// Error for foreground journal mutations.
///
/// Load paths never produce this; they fall back to defaults instead.
#[derive(Debug)]
pub enum JournalError {
    /// Storage backend rejected a write.
    Storage(StorageError),
    /// A collection could not be serialized for persistence.
    Codec(serde_json::Error),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "snapshot serialization failed: {err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<StorageError> for JournalError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Shared handle used by background tasks to reach the journal.
pub type SharedJournal<S> = Arc<Mutex<Journal<S>>>;

/// Top-level application state container.
///
/// Owns all collections exclusively; background activities reach it only
/// through [`SharedJournal`]. The lock is never held across an await point.
pub struct Journal<S: StateStore> {
    store: S,
    theme: ThemeName,
    pub(crate) notes: Vec<Note>,
    /// Ids with an enrichment round in flight. Not persisted.
    pub(crate) pending: BTreeSet<NoteId>,
    pub(crate) priorities: Vec<Priority>,
    pub(crate) moods: Vec<MoodEntry>,
    pub(crate) board: Vec<MoodBoardItem>,
    pub(crate) rituals: Vec<Ritual>,
}

impl<S: StateStore> Journal<S> {
    /// Loads journal state from the store.
    ///
    /// Each entry falls back independently: an absent or unparseable blob
    /// yields that collection's default and the rest load normally.
    pub fn load(store: S) -> Self {
        let notes = read_or(&store, keys::NOTES, Vec::new);
        let priorities = read_or(&store, keys::PRIORITIES, Vec::new);
        let moods = read_or(&store, keys::MOODS, Vec::new);
        let board = read_or(&store, keys::BOARD, default_board);
        let rituals = read_or(&store, keys::RITUALS, default_rituals);
        let theme = read_theme(&store);

        info!(
            "event=journal_load module=journal status=ok notes={} priorities={} moods={} board={} rituals={} theme={}",
            notes.len(),
            priorities.len(),
            moods.len(),
            board.len(),
            rituals.len(),
            theme.as_str()
        );

        Self {
            store,
            theme,
            notes,
            pending: BTreeSet::new(),
            priorities,
            moods,
            board,
            rituals,
        }
    }

    /// Wraps the journal for use by background tasks.
    pub fn into_shared(self) -> SharedJournal<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    /// Switches the active theme and persists the selection.
    pub fn set_theme(&mut self, theme: ThemeName) -> JournalResult<()> {
        self.theme = theme;
        self.store.write(keys::THEME, theme.as_str())?;
        Ok(())
    }

    pub(crate) fn persist_notes(&mut self) -> JournalResult<()> {
        let blob = serde_json::to_string(&self.notes)?;
        self.store.write(keys::NOTES, &blob)?;
        Ok(())
    }

    pub(crate) fn persist_priorities(&mut self) -> JournalResult<()> {
        let blob = serde_json::to_string(&self.priorities)?;
        self.store.write(keys::PRIORITIES, &blob)?;
        Ok(())
    }

    pub(crate) fn persist_moods(&mut self) -> JournalResult<()> {
        let blob = serde_json::to_string(&self.moods)?;
        self.store.write(keys::MOODS, &blob)?;
        Ok(())
    }

    pub(crate) fn persist_board(&mut self) -> JournalResult<()> {
        let blob = serde_json::to_string(&self.board)?;
        self.store.write(keys::BOARD, &blob)?;
        Ok(())
    }

    pub(crate) fn persist_rituals(&mut self) -> JournalResult<()> {
        let blob = serde_json::to_string(&self.rituals)?;
        self.store.write(keys::RITUALS, &blob)?;
        Ok(())
    }
}

fn read_or<S: StateStore, T: DeserializeOwned>(
    store: &S,
    key: &str,
    fallback: impl FnOnce() -> T,
) -> T {
    match store.read(key) {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=journal_load module=journal status=warn key={key} error_code=corrupt_entry error={err}"
                );
                fallback()
            }
        },
        Ok(None) => fallback(),
        Err(err) => {
            warn!(
                "event=journal_load module=journal status=warn key={key} error_code=read_failed error={err}"
            );
            fallback()
        }
    }
}

fn read_theme<S: StateStore>(store: &S) -> ThemeName {
    match store.read(keys::THEME) {
        Ok(Some(value)) => ThemeName::parse(value.trim()).unwrap_or_else(|| {
            warn!(
                "event=journal_load module=journal status=warn key={} error_code=unknown_theme",
                keys::THEME
            );
            ThemeName::default()
        }),
        Ok(None) => ThemeName::default(),
        Err(err) => {
            warn!(
                "event=journal_load module=journal status=warn key={} error_code=read_failed error={err}",
                keys::THEME
            );
            ThemeName::default()
        }
    }
}
