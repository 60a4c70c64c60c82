//! Mood board domain model.
//!
//! # Responsibility
//! - Define board items and their per-kind content interpretation.
//! - Validate color content so stored snapshots only hold renderable values.
//!
//! # Invariants
//! - `content` of a `Color` item is always a `#RRGGBB` hex value.
//! - `content` of `Image`/`Affirmation` items is free text (URL or prose).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a board item.
pub type BoardItemId = Uuid;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"));

const DEFAULT_AFFIRMATION: &str = "Write your own light...";
const DEFAULT_COLOR: &str = "#E2E8F0";

/// How a board item's `content` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardItemKind {
    /// `content` is an image URL.
    Image,
    /// `content` is a `#RRGGBB` hex value.
    Color,
    /// `content` is short affirmation text.
    Affirmation,
}

/// One tile on the visual mood board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBoardItem {
    pub id: BoardItemId,
    /// Serialized as `type` to match the stored snapshot shape.
    #[serde(rename = "type")]
    pub kind: BoardItemKind,
    pub content: String,
}

impl MoodBoardItem {
    pub fn new(kind: BoardItemKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            content: content.into(),
        }
    }

    /// Creates an item with the starter content for its kind.
    pub fn with_default_content(kind: BoardItemKind) -> Self {
        let id = Uuid::now_v7();
        let content = match kind {
            BoardItemKind::Affirmation => DEFAULT_AFFIRMATION.to_string(),
            BoardItemKind::Color => DEFAULT_COLOR.to_string(),
            BoardItemKind::Image => {
                let seed: String = id.simple().to_string().chars().take(8).collect();
                format!("https://picsum.photos/seed/{seed}/400/400")
            }
        };
        Self { id, kind, content }
    }
}

/// Returns whether `value` is a renderable `#RRGGBB` color.
pub fn is_valid_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

/// Starter board shown before the user has saved anything.
pub fn default_board() -> Vec<MoodBoardItem> {
    vec![
        MoodBoardItem::new(
            BoardItemKind::Affirmation,
            "You are blooming in your own time.",
        ),
        MoodBoardItem::new(BoardItemKind::Color, "#E5E1D8"),
        MoodBoardItem::new(
            BoardItemKind::Image,
            "https://picsum.photos/seed/calm1/400/400",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{
        default_board, is_valid_hex_color, BoardItemKind, MoodBoardItem, DEFAULT_COLOR,
    };

    #[test]
    fn hex_color_validation() {
        assert!(is_valid_hex_color("#E5E1D8"));
        assert!(is_valid_hex_color("#a1b2c3"));
        assert!(!is_valid_hex_color("E5E1D8"));
        assert!(!is_valid_hex_color("#E5E1D"));
        assert!(!is_valid_hex_color("#E5E1D8FF"));
        assert!(!is_valid_hex_color("#GGGGGG"));
    }

    #[test]
    fn default_content_per_kind() {
        let color = MoodBoardItem::with_default_content(BoardItemKind::Color);
        assert_eq!(color.content, DEFAULT_COLOR);

        let image = MoodBoardItem::with_default_content(BoardItemKind::Image);
        assert!(image.content.starts_with("https://picsum.photos/seed/"));

        let affirmation = MoodBoardItem::with_default_content(BoardItemKind::Affirmation);
        assert!(!affirmation.content.is_empty());
    }

    #[test]
    fn starter_board_has_one_item_per_kind() {
        let board = default_board();
        assert_eq!(board.len(), 3);
        assert!(board.iter().any(|i| i.kind == BoardItemKind::Affirmation));
        assert!(board.iter().any(|i| i.kind == BoardItemKind::Color));
        assert!(board.iter().any(|i| i.kind == BoardItemKind::Image));
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let item = MoodBoardItem::new(BoardItemKind::Color, "#E5E1D8");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "color");
        assert!(json.get("kind").is_none());
    }
}
