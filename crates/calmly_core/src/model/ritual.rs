//! Ritual domain model.
//!
//! # Responsibility
//! - Define timed self-care routines and their checklists.
//! - Provide the built-in rituals seeded on first run.
//!
//! # Invariants
//! - `duration_minutes` is fixed at definition time.
//! - Tasks belong strictly to their parent ritual; they have no identity
//!   outside of it.

use serde::{Deserialize, Serialize};

/// One checklist entry under a ritual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RitualTask {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// A named, timed self-care routine with an associated checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ritual {
    pub id: String,
    pub name: String,
    /// Decorative glyph only; carries no behavior.
    pub icon: String,
    /// Serialized as `duration` to match the stored snapshot shape.
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub tasks: Vec<RitualTask>,
}

impl Ritual {
    /// Countdown length seeded into a timer session.
    pub fn countdown_seconds(&self) -> u32 {
        self.duration_minutes * 60
    }
}

fn task(id: &str, text: &str) -> RitualTask {
    RitualTask {
        id: id.to_string(),
        text: text.to_string(),
        completed: false,
    }
}

/// Built-in rituals seeded when storage has no ritual entry yet.
pub fn default_rituals() -> Vec<Ritual> {
    vec![
        Ritual {
            id: "1".to_string(),
            name: "5-minute tidy reset".to_string(),
            icon: "🧺".to_string(),
            duration_minutes: 5,
            tasks: vec![
                task("t1", "Clear the desk surface"),
                task("t2", "Put away stray cups"),
                task("t3", "Arrange pillows"),
            ],
        },
        Ritual {
            id: "2".to_string(),
            name: "Creative desk refresh".to_string(),
            icon: "🎨".to_string(),
            duration_minutes: 10,
            tasks: vec![
                task("t4", "Refill water carafe"),
                task("t5", "Light a candle"),
                task("t6", "Open a window for fresh air"),
            ],
        },
        Ritual {
            id: "3".to_string(),
            name: "Sunday calm reset".to_string(),
            icon: "🕯️".to_string(),
            duration_minutes: 20,
            tasks: vec![
                task("t7", "Review the coming week"),
                task("t8", "Refill journals"),
                task("t9", "Water the plants"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::default_rituals;

    #[test]
    fn countdown_seconds_scales_from_minutes() {
        let rituals = default_rituals();
        assert_eq!(rituals[0].countdown_seconds(), 300);
        assert_eq!(rituals[2].countdown_seconds(), 1200);
    }

    #[test]
    fn default_rituals_start_with_open_checklists() {
        for ritual in default_rituals() {
            assert_eq!(ritual.tasks.len(), 3);
            assert!(ritual.tasks.iter().all(|t| !t.completed));
        }
    }

    #[test]
    fn duration_serializes_under_original_name() {
        let json = serde_json::to_value(&default_rituals()[0]).unwrap();
        assert_eq!(json["duration"], 5);
        assert!(json.get("duration_minutes").is_none());
    }
}
