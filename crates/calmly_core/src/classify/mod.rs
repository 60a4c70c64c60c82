//! Note classification boundary.
//!
//! # Responsibility
//! - Define the classification port and its result shape.
//!
//! # Invariants
//! - Failures are an explicit absence (`None`), never an error across the
//!   boundary; callers rely on this operation failing soft.

mod gemini;

pub use gemini::{GeminiClassifier, GeminiConfig};

use async_trait::async_trait;

use crate::model::note::NoteCategory;

/// Enrichment result produced by a classification backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// One of the three classified labels; never `Unsorted`.
    pub category: NoteCategory,
    /// One-sentence summary of the note.
    pub summary: String,
}

/// Classification port.
///
/// Implementations must degrade every failure — input too short, transport,
/// timeout, schema violation — to `None` and keep the details in the log.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, content: &str) -> Option<Classification>;
}
