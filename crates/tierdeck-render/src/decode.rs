//! Turning tile image sources into pixel buffers.

use crate::RenderError;
use image::DynamicImage;
use tierdeck_core::ImageSource;

/// Resolves URI image sources to raw bytes.
///
/// Inline (data-URI style) sources never hit the resolver; the platform
/// shell supplies one that reads from its asset root.
pub trait SourceResolver {
    /// Fetch the bytes behind a URI.
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, RenderError>;
}

/// Resolver for contexts where only inline sources are expected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl SourceResolver for NullResolver {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Resolve {
            uri: uri.to_string(),
            reason: "no resolver available".to_string(),
        })
    }
}

/// Decode a tile source into pixels.
pub fn decode_source(
    source: &ImageSource,
    resolver: &dyn SourceResolver,
) -> Result<DynamicImage, RenderError> {
    let bytes = match source {
        ImageSource::Uri(uri) => resolver.fetch(uri)?,
        ImageSource::Encoded { .. } => source
            .data()
            .ok_or_else(|| RenderError::Decode("invalid base64 payload".to_string()))?,
    };
    image::load_from_memory(&bytes).map_err(|err| RenderError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::encoded_square;

    #[test]
    fn test_decode_inline_source() {
        let source = encoded_square(3, [10, 20, 30, 255]);
        let decoded = decode_source(&source, &NullResolver).unwrap();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 3);
    }

    #[test]
    fn test_uri_without_resolver_fails() {
        let source = ImageSource::Uri("images/a.png".to_string());
        assert!(matches!(
            decode_source(&source, &NullResolver),
            Err(RenderError::Resolve { .. })
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let source = ImageSource::from_bytes(tierdeck_core::ImageFormat::Png, &[0, 1, 2, 3]);
        assert!(matches!(
            decode_source(&source, &NullResolver),
            Err(RenderError::Decode(_))
        ));
    }
}
