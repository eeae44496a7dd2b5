//! TierDeck Render Library
//!
//! Pixel work for TierDeck: image decoding, the half-and-half tile
//! compositor, and the CPU rasterizer that captures the board as a PNG.

mod compose;
mod decode;
mod export;
#[cfg(test)]
mod test_util;

pub use compose::compose;
pub use decode::{decode_source, NullResolver, SourceResolver};
pub use export::{render_board, ExportBitmap, ExportOptions};

use thiserror::Error;
use tierdeck_core::TierError;

/// Errors from decoding, compositing, or rasterizing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not resolve image source {uri}: {reason}")]
    Resolve { uri: String, reason: String },
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("could not encode output image: {0}")]
    Encode(String),
}

impl RenderError {
    /// Surface this error as a composition failure.
    pub fn into_decode_error(self) -> TierError {
        TierError::ImageDecode(self.to_string())
    }

    /// Surface this error as a capture failure.
    pub fn into_capture_error(self) -> TierError {
        TierError::ExportCapture(self.to_string())
    }
}
