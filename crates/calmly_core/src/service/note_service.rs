//! Note use-case service and enrichment pipeline.
//!
//! # Responsibility
//! - Optimistic note insert that returns before classification resolves.
//! - Background enrichment: classify, then merge back by id.
//!
//! # Invariants
//! - Nothing escapes an enrichment task: failures leave the placeholder
//!   and are logged only.
//! - Enrichment completions may arrive out of submission order; each
//!   patches only the id it was requested for.
//! - Must be used inside a Tokio runtime (tasks spawn on the ambient
//!   runtime).

use log::{debug, error, info};
use std::sync::Arc;

use crate::classify::Classifier;
use crate::journal::{JournalResult, SharedJournal};
use crate::model::note::{Note, NoteId};
use crate::storage::StateStore;

/// Service facade over the note collection and its enrichment pipeline.
pub struct NoteService<S, C>
where
    S: StateStore + Send + 'static,
    C: Classifier + 'static,
{
    journal: SharedJournal<S>,
    classifier: Arc<C>,
}

impl<S, C> NoteService<S, C>
where
    S: StateStore + Send + 'static,
    C: Classifier + 'static,
{
    pub fn new(journal: SharedJournal<S>, classifier: Arc<C>) -> Self {
        Self {
            journal,
            classifier,
        }
    }

    /// Adds a note optimistically and schedules background enrichment.
    ///
    /// Returns as soon as the placeholder note is persisted; the id is
    /// already visible in [`Self::list`] at that point. Blank input is a
    /// no-op (`None`).
    pub fn add(&self, content: &str) -> JournalResult<Option<NoteId>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let note = Note::new(content);
        let id = note.id;
        self.journal.lock().insert_note(note)?;
        info!("event=note_add module=notes status=ok id={id}");
        self.spawn_enrichment(id, content.to_string());
        Ok(Some(id))
    }

    /// Explicitly re-runs enrichment for an existing note.
    ///
    /// Overlapping rounds for the same note resolve last-write-wins by
    /// arrival order. Returns `false` for an unknown id.
    pub fn reclassify(&self, id: NoteId) -> bool {
        let content = {
            let mut journal = self.journal.lock();
            let Some(content) = journal.note(id).map(|note| note.content.clone()) else {
                return false;
            };
            journal.mark_pending(id);
            content
        };
        info!("event=note_reclassify module=notes status=ok id={id}");
        self.spawn_enrichment(id, content);
        true
    }

    /// Removes a note unconditionally.
    pub fn delete(&self, id: NoteId) -> JournalResult<bool> {
        self.journal.lock().delete_note(id)
    }

    /// Lists notes in reverse-creation order with an optional
    /// case-insensitive substring filter.
    pub fn list(&self, filter: Option<&str>) -> Vec<Note> {
        self.journal.lock().notes(filter)
    }

    /// Ids whose enrichment round has not resolved yet.
    pub fn pending_ids(&self) -> Vec<NoteId> {
        self.journal.lock().pending_note_ids()
    }

    fn spawn_enrichment(&self, id: NoteId, content: String) {
        let journal = Arc::clone(&self.journal);
        let classifier = Arc::clone(&self.classifier);
        tokio::spawn(async move {
            let outcome = classifier.classify(&content).await;
            let mut journal = journal.lock();
            match outcome {
                Some(classification) => {
                    let label = classification.category.as_str();
                    match journal.apply_classification(id, classification) {
                        Ok(true) => {
                            info!("event=note_enrich module=notes status=ok id={id} category={label}");
                        }
                        Ok(false) => {
                            // note deleted mid-flight; the result is discarded
                        }
                        Err(err) => {
                            error!(
                                "event=note_enrich module=notes status=error id={id} error_code=persist_failed error={err}"
                            );
                        }
                    }
                }
                None => {
                    journal.clear_pending(id);
                    debug!("event=note_enrich module=notes status=warn id={id} reason=no_result");
                }
            }
        });
    }
}
