//! Composition requests: the core half of the two-image merge pipeline.
//!
//! The session hands out a [`CompositionRequest`] snapshot of the two
//! selected tiles; pixel work happens elsewhere (decode may suspend), and
//! the finished image comes back through
//! [`Session::finish_composition`](crate::Session::finish_composition).

use crate::tile::ImageSource;

/// Which way the two halves are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Left half of the first image, right half of the second.
    Horizontal,
    /// Top half of the first image, bottom half of the second.
    Vertical,
}

/// One side of a pending composition.
#[derive(Debug, Clone)]
pub struct ComposeInput {
    pub source: ImageSource,
    pub label: String,
}

/// Snapshot of a two-tile composition, in selection order.
///
/// The output raster takes the first input's dimensions; labels come from
/// the selection-time snapshots, not the tiles' current labels.
#[derive(Debug, Clone)]
pub struct CompositionRequest {
    pub orientation: Orientation,
    pub first: ComposeInput,
    pub second: ComposeInput,
}

impl CompositionRequest {
    /// Label of the composed tile: both labels joined with " / ",
    /// omitting empty sides.
    pub fn joined_label(&self) -> String {
        joined_label(&self.first.label, &self.second.label)
    }
}

/// Join two labels with " / ", omitting empty sides.
pub fn joined_label(first: &str, second: &str) -> String {
    [first, second]
        .iter()
        .filter(|label| !label.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" / ")
}
