//! Reorder engine: one set of drop rules for every input path.

use crate::board::{Board, RowId};
use crate::tile::TileId;

/// Where inside the target row a drag was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSpot {
    /// Released on top of another tile.
    OnTile(TileId),
    /// Released on empty row space.
    Empty,
}

/// Move a dragged tile into a target row.
///
/// Rules, identical for pointer and touch input:
/// - an unresolvable dragged tile or target row is a silent no-op;
/// - dropping on another tile that sits in the target row inserts the
///   dragged tile immediately before it;
/// - anything else (empty space, dropping a tile on itself, or a reference
///   tile that lives elsewhere) appends to the target row's tail.
///
/// The move is always an ownership transfer: the tile leaves its previous
/// row before it re-enters the target row.
///
/// Returns `true` if the board changed.
pub fn reorder(board: &mut Board, dragged: TileId, spot: DropSpot, target: RowId) -> bool {
    if board.row(target).is_none() {
        return false;
    }
    let Some(tile) = board.take(dragged) else {
        return false;
    };

    match spot {
        DropSpot::OnTile(reference)
            if reference != dragged && board.row_of(reference) == Some(target) =>
        {
            board.insert_before(target, tile, reference);
        }
        _ => {
            board.insert_at_tail(target, tile);
        }
    }
    true
}
