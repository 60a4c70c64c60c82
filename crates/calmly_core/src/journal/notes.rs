//! Note collection operations.
//!
//! # Responsibility
//! - Maintain notes in reverse-creation order.
//! - Track which ids have an enrichment round in flight.
//! - Merge enrichment results back by id.
//!
//! # Invariants
//! - A patch locates its note by id, never by position.
//! - `pending` holds exactly the ids with an unresolved round; it is
//!   session state and never persisted.

use log::debug;

use crate::classify::Classification;
use crate::model::note::{Note, NoteId};
use crate::storage::StateStore;

use super::{Journal, JournalResult};

impl<S: StateStore> Journal<S> {
    /// Inserts a freshly created note at the head of the list and marks it
    /// pending enrichment.
    pub(crate) fn insert_note(&mut self, note: Note) -> JournalResult<()> {
        self.pending.insert(note.id);
        self.notes.insert(0, note);
        self.persist_notes()
    }

    /// Removes a note unconditionally. Returns whether anything was removed.
    pub fn delete_note(&mut self, id: NoteId) -> JournalResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        self.pending.remove(&id);
        if self.notes.len() == before {
            return Ok(false);
        }
        self.persist_notes()?;
        Ok(true)
    }

    /// Lists notes in reverse-creation order, optionally filtered by a
    /// case-insensitive substring match on content or summary.
    pub fn notes(&self, filter: Option<&str>) -> Vec<Note> {
        let query = filter
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        match query {
            None => self.notes.clone(),
            Some(q) => self
                .notes
                .iter()
                .filter(|note| {
                    note.content.to_lowercase().contains(&q)
                        || note
                            .summary
                            .as_deref()
                            .is_some_and(|s| s.to_lowercase().contains(&q))
                })
                .cloned()
                .collect(),
        }
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Ids whose enrichment round has not resolved yet.
    pub fn pending_note_ids(&self) -> Vec<NoteId> {
        self.pending.iter().copied().collect()
    }

    pub fn is_pending(&self, id: NoteId) -> bool {
        self.pending.contains(&id)
    }

    /// Applies an enrichment result to the note it was requested for.
    ///
    /// Returns `Ok(false)` when the note was deleted while classification
    /// was in flight; the result is discarded in that case.
    pub(crate) fn apply_classification(
        &mut self,
        id: NoteId,
        classification: Classification,
    ) -> JournalResult<bool> {
        self.pending.remove(&id);
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!("event=note_enrich module=journal status=warn id={id} reason=note_missing");
            return Ok(false);
        };
        note.category = classification.category;
        note.summary = Some(classification.summary);
        self.persist_notes()?;
        Ok(true)
    }

    /// Marks an existing note as having a round in flight.
    pub(crate) fn mark_pending(&mut self, id: NoteId) {
        self.pending.insert(id);
    }

    /// Clears the pending marker after a round resolved without a result.
    pub(crate) fn clear_pending(&mut self, id: NoteId) {
        self.pending.remove(&id);
    }
}
