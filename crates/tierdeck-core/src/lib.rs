//! TierDeck Core Library
//!
//! Platform-agnostic board model and interaction logic for the TierDeck
//! tier list editor.

pub mod board;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod input;
pub mod manifest;
pub mod notice;
pub mod reorder;
pub mod selection;
pub mod session;
pub mod share;
pub mod tile;

pub use board::{Board, ContextOutcome, Row, RowId};
pub use color::Rgba;
pub use compose::{CompositionRequest, Orientation};
pub use config::{Preset, Settings, PRESETS};
pub use error::{ManifestError, TierError};
pub use input::{DragSurface, HitTarget, PointerDrag, TouchDrag};
pub use notice::{Notice, NoticeCenter, NoticePhase};
pub use reorder::{reorder, DropSpot};
pub use selection::{SelectionTracker, Toggle};
pub use session::Session;
pub use tile::{ImageFormat, ImageSource, Tile, TileId};
