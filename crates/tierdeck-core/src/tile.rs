//! Tiles and their image payloads.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a tile on a board.
///
/// Ids are minted monotonically by the owning [`Board`](crate::Board); they
/// are unique within a board for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// Image format for stored image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from a MIME type string.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// Where a tile's pixels come from.
///
/// Manifest tiles reference an external URI (a file path in the native
/// shell); uploaded, pasted, and composed tiles carry their bytes inline as
/// base64, the equivalent of a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// External reference, resolved by the platform at decode time.
    Uri(String),
    /// Inline encoded image data.
    Encoded {
        /// Encoding of the payload.
        format: ImageFormat,
        /// Base64-encoded image bytes.
        base64: String,
    },
}

impl ImageSource {
    /// Wrap raw encoded image bytes.
    pub fn from_bytes(format: ImageFormat, data: &[u8]) -> Self {
        ImageSource::Encoded {
            format,
            base64: STANDARD.encode(data),
        }
    }

    /// Parse a `data:image/...;base64,...` URI into an encoded source.
    /// Anything else is kept as an opaque URI.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        if let Some(parsed) = Self::parse_data_uri(&uri) {
            return parsed;
        }
        ImageSource::Uri(uri)
    }

    fn parse_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        let format = ImageFormat::from_mime_type(mime)?;
        Some(ImageSource::Encoded {
            format,
            base64: payload.to_string(),
        })
    }

    /// Render this source as a displayable URI (data URI for inline bytes).
    pub fn to_uri(&self) -> String {
        match self {
            ImageSource::Uri(uri) => uri.clone(),
            ImageSource::Encoded { format, base64 } => {
                format!("data:{};base64,{}", format.mime_type(), base64)
            }
        }
    }

    /// Get the decoded payload bytes for an inline source.
    pub fn data(&self) -> Option<Vec<u8>> {
        match self {
            ImageSource::Uri(_) => None,
            ImageSource::Encoded { base64, .. } => STANDARD.decode(base64).ok(),
        }
    }
}

/// A single image tile on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) id: TileId,
    /// Image payload.
    pub source: ImageSource,
    /// Free-text label overlaid on the tile.
    pub label: String,
    /// Tiles loaded from the startup manifest are protected from removal.
    pub initial: bool,
    /// Visual selection marker, kept in sync by the session.
    #[serde(skip)]
    pub selected: bool,
}

impl Tile {
    /// Create a removable tile.
    pub fn new(id: TileId, source: ImageSource, label: impl Into<String>) -> Self {
        Self {
            id,
            source,
            label: label.into(),
            initial: false,
            selected: false,
        }
    }

    /// Mark this tile as an initial (non-removable) tile.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// Tile identity.
    pub fn id(&self) -> TileId {
        self.id
    }
}
