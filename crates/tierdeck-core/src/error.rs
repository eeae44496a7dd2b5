//! Error taxonomy for board operations.

use thiserror::Error;

/// Errors raised while loading the startup manifest.
#[derive(Debug, Clone, Error)]
pub enum ManifestError {
    #[error("could not fetch manifest: {0}")]
    Fetch(String),
    #[error("manifest line {line} has no image source")]
    MissingSource { line: usize },
}

/// Errors surfaced to the user as transient notices.
///
/// None of these are fatal to the session: the manifest error leaves an
/// empty board, a decode error aborts only the pending composition, and a
/// capture error degrades the share flow to its delayed fallback.
#[derive(Debug, Clone, Error)]
pub enum TierError {
    #[error("failed to load the starting images: {0}")]
    ManifestLoad(#[from] ManifestError),
    #[error("failed to decode an image for composition: {0}")]
    ImageDecode(String),
    #[error("at most two tiles can be selected")]
    SelectionFull,
    #[error("exactly two tiles must be selected")]
    InsufficientSelection,
    #[error("board capture failed: {0}")]
    ExportCapture(String),
}
