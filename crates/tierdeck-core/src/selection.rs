//! Selection tracking for the compose pipeline.

use crate::error::TierError;
use crate::tile::TileId;
use serde::{Deserialize, Serialize};

/// Maximum number of tiles that can be selected at once.
pub const MAX_SELECTED: usize = 2;

/// A selected tile together with its label snapshot.
///
/// The label is captured at selection time: edits made to the tile's label
/// afterwards do not affect a composition already in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub id: TileId,
    pub label: String,
}

/// What a toggle call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
}

/// Holds the 0-2 currently selected tiles in selection order.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    picks: Vec<Pick>,
}

impl SelectionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a tile's membership.
    ///
    /// Deselecting is idempotent; selecting a third tile fails with
    /// [`TierError::SelectionFull`] and leaves the tracker unchanged.
    pub fn toggle(&mut self, id: TileId, label_snapshot: &str) -> Result<Toggle, TierError> {
        if let Some(index) = self.picks.iter().position(|pick| pick.id == id) {
            self.picks.remove(index);
            return Ok(Toggle::Deselected);
        }
        if self.picks.len() >= MAX_SELECTED {
            return Err(TierError::SelectionFull);
        }
        self.picks.push(Pick {
            id,
            label: label_snapshot.to_string(),
        });
        Ok(Toggle::Selected)
    }

    /// Unconditionally empty the selection.
    pub fn clear(&mut self) {
        self.picks.clear();
    }

    /// Current selection size (0, 1, or 2).
    pub fn count(&self) -> usize {
        self.picks.len()
    }

    /// Check membership.
    pub fn is_selected(&self, id: TileId) -> bool {
        self.picks.iter().any(|pick| pick.id == id)
    }

    /// Drop a tile from the selection if present (tile left the board).
    pub fn discard(&mut self, id: TileId) {
        self.picks.retain(|pick| pick.id != id);
    }

    /// The selected pair in selection order, when exactly two are held.
    pub fn pair(&self) -> Option<(&Pick, &Pick)> {
        match self.picks.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    /// Iterate the picks in selection order.
    pub fn picks(&self) -> impl Iterator<Item = &Pick> {
        self.picks.iter()
    }
}
