//! Note domain model.
//!
//! # Responsibility
//! - Define the free-form note record and its classification lifecycle.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `content` is immutable after creation.
//! - `category` starts as `Unsorted` and changes only through enrichment.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// UUID v7 keeps ids unique while remaining derived from creation time,
/// so freshly minted ids sort in creation order.
pub type NoteId = Uuid;

/// Classification labels for notes.
///
/// `Unsorted` is the placeholder a note holds before (or if never)
/// classified. The external service may only produce the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteCategory {
    Idea,
    Thought,
    Dream,
    Unsorted,
}

impl NoteCategory {
    /// Parses a label produced by the classification service.
    ///
    /// Returns `None` for anything outside the three allowed labels;
    /// `Unsorted` is not a valid service output.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value {
            "Idea" => Some(Self::Idea),
            "Thought" => Some(Self::Thought),
            "Dream" => Some(Self::Dream),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Thought => "Thought",
            Self::Dream => "Dream",
            Self::Unsorted => "Unsorted",
        }
    }
}

/// Free-form journal note with optional enrichment fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable id used by enrichment merge-back and deletion.
    pub id: NoteId,
    /// Raw user text, kept exactly as submitted.
    pub content: String,
    /// Placeholder until enrichment succeeds, then one of the three labels.
    pub category: NoteCategory,
    /// One-sentence summary attached by enrichment. Absent until then.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates a note in the placeholder category with a fresh id.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            content: content.into(),
            category: NoteCategory::Unsorted,
            summary: None,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Returns whether enrichment has attached a classified category.
    pub fn is_classified(&self) -> bool {
        self.category != NoteCategory::Unsorted
    }
}
