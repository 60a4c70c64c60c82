//! Planner domain model: daily mood and priorities.
//!
//! # Responsibility
//! - Define the mood log entry and the bounded priority record.
//!
//! # Invariants
//! - A mood entry is keyed by calendar day; one entry per day at most.
//! - The live priority collection never exceeds [`MAX_PRIORITIES`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a priority.
pub type PriorityId = Uuid;

/// Upper bound on live priorities, enforced at creation time.
pub const MAX_PRIORITIES: usize = 5;

/// Fixed mood palette for the daily check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sunny,
    Cloudy,
    Rainy,
    Moon,
    Sparkle,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Sunny,
        Mood::Cloudy,
        Mood::Rainy,
        Mood::Moon,
        Mood::Sparkle,
    ];

    /// Decorative glyph shown next to the mood.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Sunny => "🌤️",
            Self::Cloudy => "☁️",
            Self::Rainy => "🌧️",
            Self::Moon => "🌙",
            Self::Sparkle => "✨",
        }
    }
}

/// One mood check-in for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Calendar-day key; serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub mood: Mood,
}

/// One entry of the bounded daily priority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub id: PriorityId,
    pub text: String,
    pub completed: bool,
}

impl Priority {
    /// Creates an open priority with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            completed: false,
        }
    }
}
