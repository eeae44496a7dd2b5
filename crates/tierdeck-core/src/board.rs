//! Board document: the pool row plus the ranked tier rows.

use crate::tile::{ImageSource, Tile, TileId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default tier names, top rank first.
pub const DEFAULT_TIERS: [&str; 5] = ["S", "A", "B", "C", "D"];

/// Identity of a row on the board.
///
/// Row identity is positional: the single unranked pool, or a tier row
/// addressed by its index from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowId {
    /// The unranked pool row.
    Pool,
    /// A ranked tier row, indexed from the top.
    Tier(usize),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Pool => write!(f, "pool"),
            RowId::Tier(index) => write!(f, "tier-{index}"),
        }
    }
}

/// An ordered sequence of tiles under one name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Display name ("pool" for the pool, tier letter otherwise).
    pub name: String,
    /// Tiles in left-to-right visual order.
    pub tiles: Vec<Tile>,
}

impl Row {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tiles: Vec::new(),
        }
    }

    /// Number of tiles in this row.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the row holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn position(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id == id)
    }
}

/// Outcome of the polymorphic context action (right-click / long-press).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOutcome {
    /// The tile was removed from the board.
    Removed,
    /// The tile was relocated to the pool tail.
    ReturnedToPool,
    /// Nothing changed (protected tile, or unknown id).
    Kept,
}

/// The full board: one pool row plus the ordered tier rows.
///
/// Every tile is owned by exactly one row; moving a tile between rows is an
/// ownership transfer, never a copy. The board also owns the monotonic tile
/// id counter, so independent boards mint independent identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Unique board identifier.
    pub id: String,
    pool: Row,
    tiers: Vec<Row>,
    next_tile_id: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with the default tier rows.
    pub fn new() -> Self {
        Self::with_tiers(DEFAULT_TIERS)
    }

    /// Create a board with custom tier names, top rank first.
    pub fn with_tiers<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Uuid::new_v4().to_string(),
            pool: Row::new("pool"),
            tiers: names.into_iter().map(Row::new).collect(),
            next_tile_id: 0,
        }
    }

    /// Mint a fresh tile identity.
    pub fn mint_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }

    /// Create a tile from a source and label without placing it yet.
    pub fn mint_tile(&mut self, source: ImageSource, label: impl Into<String>) -> Tile {
        let id = self.mint_id();
        Tile::new(id, source, label)
    }

    /// Resolve a row id, if it addresses an existing row.
    pub fn row(&self, row: RowId) -> Option<&Row> {
        match row {
            RowId::Pool => Some(&self.pool),
            RowId::Tier(index) => self.tiers.get(index),
        }
    }

    fn row_mut(&mut self, row: RowId) -> Option<&mut Row> {
        match row {
            RowId::Pool => Some(&mut self.pool),
            RowId::Tier(index) => self.tiers.get_mut(index),
        }
    }

    /// All rows in export order: pool first, then tiers top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &Row)> {
        std::iter::once((RowId::Pool, &self.pool)).chain(
            self.tiers
                .iter()
                .enumerate()
                .map(|(index, row)| (RowId::Tier(index), row)),
        )
    }

    /// Find a tier row by name.
    pub fn tier_by_name(&self, name: &str) -> Option<RowId> {
        self.tiers
            .iter()
            .position(|row| row.name == name)
            .map(RowId::Tier)
    }

    /// Locate the row currently owning a tile.
    pub fn row_of(&self, id: TileId) -> Option<RowId> {
        self.rows()
            .find(|(_, row)| row.position(id).is_some())
            .map(|(row_id, _)| row_id)
    }

    /// Get a tile by id.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.rows()
            .find_map(|(_, row)| row.tiles.iter().find(|t| t.id == id))
    }

    /// Get a mutable reference to a tile by id.
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        if self.pool.position(id).is_some() {
            return self.pool.tiles.iter_mut().find(|t| t.id == id);
        }
        self.tiers
            .iter_mut()
            .find_map(|row| row.tiles.iter_mut().find(|t| t.id == id))
    }

    /// Total number of tiles on the board.
    pub fn len(&self) -> usize {
        self.rows().map(|(_, row)| row.len()).sum()
    }

    /// Check if the board holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a tile at the head of a row.
    pub fn insert_at_head(&mut self, row: RowId, tile: Tile) {
        if let Some(row) = self.row_mut(row) {
            row.tiles.insert(0, tile);
        }
    }

    /// Insert a tile at the tail of a row.
    pub fn insert_at_tail(&mut self, row: RowId, tile: Tile) {
        if let Some(row) = self.row_mut(row) {
            row.tiles.push(tile);
        }
    }

    /// Insert a tile immediately before a reference tile in a row.
    /// Falls back to the tail if the reference is not in that row.
    pub fn insert_before(&mut self, row: RowId, tile: Tile, reference: TileId) {
        if let Some(row) = self.row_mut(row) {
            match row.position(reference) {
                Some(index) => row.tiles.insert(index, tile),
                None => row.tiles.push(tile),
            }
        }
    }

    /// Detach a tile from whichever row owns it (ownership transfer).
    pub fn take(&mut self, id: TileId) -> Option<Tile> {
        let row_id = self.row_of(id)?;
        let row = self.row_mut(row_id)?;
        let index = row.position(id)?;
        Some(row.tiles.remove(index))
    }

    /// Remove a tile from the board.
    ///
    /// Refuses (returning `None`, state unchanged) for tiles flagged as
    /// initial: the protection travels with the tile wherever it sits.
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        if self.tile(id)?.initial {
            log::debug!("refusing to remove protected tile {id}");
            return None;
        }
        self.take(id)
    }

    /// Serialize the board to JSON (for inspection tooling).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a board from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply the polymorphic context action to a tile.
    ///
    /// In the pool the action removes the tile (unless protected); in a tier
    /// row it relocates the tile back to the pool tail.
    pub fn context_action(&mut self, id: TileId) -> ContextOutcome {
        match self.row_of(id) {
            Some(RowId::Pool) => {
                if self.remove(id).is_some() {
                    ContextOutcome::Removed
                } else {
                    ContextOutcome::Kept
                }
            }
            Some(RowId::Tier(_)) => {
                // Tier rows hand the tile back regardless of the initial flag.
                match self.take(id) {
                    Some(tile) => {
                        self.insert_at_tail(RowId::Pool, tile);
                        ContextOutcome::ReturnedToPool
                    }
                    None => ContextOutcome::Kept,
                }
            }
            None => ContextOutcome::Kept,
        }
    }
}
