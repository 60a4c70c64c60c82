//! Core domain logic for Calmly, a single-user wellness journal.
//! This crate is the single source of truth for business invariants; the
//! presentation layer stays outside the crate boundary.

pub mod classify;
pub mod journal;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod timer;

pub use classify::{Classification, Classifier, GeminiClassifier, GeminiConfig};
pub use journal::{Journal, JournalError, JournalResult, SharedJournal};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{BoardItemId, BoardItemKind, MoodBoardItem};
pub use model::note::{Note, NoteCategory, NoteId};
pub use model::planner::{Mood, MoodEntry, Priority, PriorityId, MAX_PRIORITIES};
pub use model::ritual::{default_rituals, Ritual, RitualTask};
pub use model::theme::ThemeName;
pub use service::note_service::NoteService;
pub use storage::{keys, MemoryStateStore, SqliteStateStore, StateStore, StorageError, StorageResult};
pub use timer::{format_remaining, RitualSession, RitualTimer, TimerPhase};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
