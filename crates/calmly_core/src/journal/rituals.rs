//! Ritual checklist operations.
//!
//! # Invariants
//! - Task completion lives on the ritual definition, not on any timer
//!   session, so it survives pause/resume/dismiss and reopening.

use crate::model::ritual::Ritual;
use crate::storage::StateStore;

use super::{Journal, JournalResult};

impl<S: StateStore> Journal<S> {
    pub fn rituals(&self) -> &[Ritual] {
        &self.rituals
    }

    pub fn ritual(&self, id: &str) -> Option<&Ritual> {
        self.rituals.iter().find(|ritual| ritual.id == id)
    }

    /// Flips one checklist task under a ritual and persists immediately.
    ///
    /// Unknown ritual or task ids are a no-op returning `false`.
    pub fn toggle_ritual_task(&mut self, ritual_id: &str, task_id: &str) -> JournalResult<bool> {
        let Some(ritual) = self.rituals.iter_mut().find(|r| r.id == ritual_id) else {
            return Ok(false);
        };
        let Some(task) = ritual.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        self.persist_rituals()?;
        Ok(true)
    }
}
