//! Mood board operations.

use crate::model::board::{is_valid_hex_color, BoardItemId, BoardItemKind, MoodBoardItem};
use crate::storage::StateStore;

use super::{Journal, JournalResult};

impl<S: StateStore> Journal<S> {
    /// Adds a board item with the starter content for its kind.
    pub fn add_board_item(&mut self, kind: BoardItemKind) -> JournalResult<MoodBoardItem> {
        let item = MoodBoardItem::with_default_content(kind);
        self.board.push(item.clone());
        self.persist_board()?;
        Ok(item)
    }

    /// Replaces an item's content.
    ///
    /// Color items only accept `#RRGGBB` values; an invalid color (or an
    /// unknown id) is a no-op returning `false`.
    pub fn set_board_item_content(
        &mut self,
        id: BoardItemId,
        content: &str,
    ) -> JournalResult<bool> {
        let Some(item) = self.board.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };
        if item.kind == BoardItemKind::Color && !is_valid_hex_color(content) {
            return Ok(false);
        }
        item.content = content.to_string();
        self.persist_board()?;
        Ok(true)
    }

    /// Removes a board item. Returns whether anything was removed.
    pub fn remove_board_item(&mut self, id: BoardItemId) -> JournalResult<bool> {
        let before = self.board.len();
        self.board.retain(|item| item.id != id);
        if self.board.len() == before {
            return Ok(false);
        }
        self.persist_board()?;
        Ok(true)
    }

    pub fn board(&self) -> &[MoodBoardItem] {
        &self.board
    }
}
