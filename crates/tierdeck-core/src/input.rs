//! Input adapters: thin pointer and touch front-ends over the reorder engine.

use crate::board::{Board, RowId};
use crate::reorder::{reorder, DropSpot};
use crate::tile::TileId;
use kurbo::{Point, Size};

/// What sits under a screen point: a row, and possibly a tile within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub row: RowId,
    pub tile: Option<TileId>,
}

impl HitTarget {
    fn drop_spot(&self) -> DropSpot {
        match self.tile {
            Some(tile) => DropSpot::OnTile(tile),
            None => DropSpot::Empty,
        }
    }
}

/// Hit-testing surface provided by the host shell.
///
/// The engine never talks to a concrete UI toolkit; whatever renders the
/// board resolves screen points back to rows and tiles through this trait.
pub trait DragSurface {
    /// Resolve a screen point to the row/tile under it, if any.
    fn hit_test(&self, point: Point) -> Option<HitTarget>;
}

/// A pointer-device drag: the dragged tile id travels from drag start to
/// drop, where the drop target is resolved directly by the host.
#[derive(Debug, Clone, Copy)]
pub struct PointerDrag {
    dragged: TileId,
}

impl PointerDrag {
    /// Start dragging a tile.
    pub fn begin(dragged: TileId) -> Self {
        Self { dragged }
    }

    /// The tile being dragged.
    pub fn dragged(&self) -> TileId {
        self.dragged
    }

    /// Complete the drag on a resolved target.
    pub fn drop_on(self, board: &mut Board, target: HitTarget) -> bool {
        reorder(board, self.dragged, target.drop_spot(), target.row)
    }

    /// Complete the drag at a screen point, resolving through the surface.
    /// An unresolved point is a silent no-op.
    pub fn drop_at(self, board: &mut Board, surface: &dyn DragSurface, point: Point) -> bool {
        match surface.hit_test(point) {
            Some(target) => self.drop_on(board, target),
            None => false,
        }
    }
}

/// A touch drag gesture.
///
/// While the finger moves, the tile floats with it (centered under the
/// finger); `finish` consumes the gesture, so the floating state is gone
/// after the gesture ends whether or not a drop target resolved.
#[derive(Debug, Clone, Copy)]
pub struct TouchDrag {
    dragged: TileId,
    finger: Point,
    floating: bool,
}

impl TouchDrag {
    /// Start a touch drag at the initial finger position.
    pub fn begin(dragged: TileId, finger: Point) -> Self {
        Self {
            dragged,
            finger,
            floating: false,
        }
    }

    /// The tile being dragged.
    pub fn dragged(&self) -> TileId {
        self.dragged
    }

    /// Track a finger move. From the first move on, the tile is lifted out
    /// of its row visually and follows the finger.
    pub fn move_to(&mut self, finger: Point) {
        self.finger = finger;
        self.floating = true;
    }

    /// Whether the tile is currently lifted out of normal flow.
    pub fn is_floating(&self) -> bool {
        self.floating
    }

    /// Top-left corner for drawing the floating tile centered on the finger.
    pub fn float_origin(&self, tile_size: Size) -> Point {
        Point::new(
            self.finger.x - tile_size.width / 2.0,
            self.finger.y - tile_size.height / 2.0,
        )
    }

    /// End the gesture at the final finger position.
    ///
    /// Consumes the gesture: the floating state is dropped unconditionally,
    /// even when no target resolves under the finger.
    pub fn finish(self, board: &mut Board, surface: &dyn DragSurface, finger: Point) -> bool {
        match surface.hit_test(finger) {
            Some(target) => reorder(board, self.dragged, target.drop_spot(), target.row),
            None => false,
        }
    }
}
