//! Planner operations: daily mood and bounded priorities.
//!
//! # Invariants
//! - At most one mood entry per calendar day; setting again replaces it.
//! - Priority creation is a silent no-op at capacity or on blank input.

use chrono::{Local, NaiveDate};

use crate::model::planner::{Mood, MoodEntry, Priority, PriorityId, MAX_PRIORITIES};
use crate::storage::StateStore;

use super::{Journal, JournalResult};

/// Today's calendar-day key in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl<S: StateStore> Journal<S> {
    /// Records today's mood, replacing any earlier check-in for today.
    pub fn set_mood(&mut self, mood: Mood) -> JournalResult<()> {
        self.set_mood_on(today(), mood)
    }

    /// Records a mood for a specific day, replacing any existing entry.
    pub fn set_mood_on(&mut self, date: NaiveDate, mood: Mood) -> JournalResult<()> {
        self.moods.retain(|entry| entry.date != date);
        self.moods.push(MoodEntry { date, mood });
        self.persist_moods()
    }

    pub fn mood_on(&self, date: NaiveDate) -> Option<Mood> {
        self.moods
            .iter()
            .find(|entry| entry.date == date)
            .map(|entry| entry.mood)
    }

    pub fn mood_today(&self) -> Option<Mood> {
        self.mood_on(today())
    }

    pub fn moods(&self) -> &[MoodEntry] {
        &self.moods
    }

    /// Adds a priority unless the list is at capacity or the text is blank.
    ///
    /// Both rejections are no-ops (`None`), not errors.
    pub fn add_priority(&mut self, text: &str) -> JournalResult<Option<Priority>> {
        if text.trim().is_empty() || self.priorities.len() >= MAX_PRIORITIES {
            return Ok(None);
        }
        let priority = Priority::new(text.trim());
        self.priorities.push(priority.clone());
        self.persist_priorities()?;
        Ok(Some(priority))
    }

    /// Flips one priority's completion flag. Returns whether it existed.
    pub fn toggle_priority(&mut self, id: PriorityId) -> JournalResult<bool> {
        let Some(priority) = self.priorities.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        priority.completed = !priority.completed;
        self.persist_priorities()?;
        Ok(true)
    }

    /// Removes all completed priorities. Returns how many were cleared.
    pub fn clear_completed_priorities(&mut self) -> JournalResult<usize> {
        let before = self.priorities.len();
        self.priorities.retain(|p| !p.completed);
        let cleared = before - self.priorities.len();
        if cleared > 0 {
            self.persist_priorities()?;
        }
        Ok(cleared)
    }

    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }
}
