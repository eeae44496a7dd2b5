//! Half-and-half tile compositor.

use crate::decode::{decode_source, SourceResolver};
use crate::RenderError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;
use tierdeck_core::{CompositionRequest, ImageFormat, ImageSource, Orientation};

/// Produce the merged image for a composition request.
///
/// The output takes the first image's natural dimensions over an opaque
/// white background. The first image contributes its own left (or top)
/// half; the second is resampled to the first's full dimensions before its
/// right (or bottom) half is copied across. Halves truncate on odd
/// dimensions, so the second image's half carries the extra pixel.
pub fn compose(
    request: &CompositionRequest,
    resolver: &dyn SourceResolver,
) -> Result<ImageSource, RenderError> {
    let first = decode_source(&request.first.source, resolver)?.to_rgba8();
    let second = decode_source(&request.second.source, resolver)?.to_rgba8();

    let (width, height) = first.dimensions();
    let mut out = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    if width > 0 && height > 0 {
        let resized = imageops::resize(&second, width, height, FilterType::Triangle);
        match request.orientation {
            Orientation::Horizontal => {
                let half = width / 2;
                if half > 0 {
                    let left = imageops::crop_imm(&first, 0, 0, half, height).to_image();
                    imageops::overlay(&mut out, &left, 0, 0);
                }
                let right = imageops::crop_imm(&resized, half, 0, width - half, height).to_image();
                imageops::overlay(&mut out, &right, i64::from(half), 0);
            }
            Orientation::Vertical => {
                let half = height / 2;
                if half > 0 {
                    let top = imageops::crop_imm(&first, 0, 0, width, half).to_image();
                    imageops::overlay(&mut out, &top, 0, 0);
                }
                let bottom = imageops::crop_imm(&resized, 0, half, width, height - half).to_image();
                imageops::overlay(&mut out, &bottom, 0, i64::from(half));
            }
        }
    } else {
        log::warn!("composing degenerate {width}x{height} image");
    }

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(out)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|err| RenderError::Encode(err.to_string()))?;
    Ok(ImageSource::from_bytes(ImageFormat::Png, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::NullResolver;
    use crate::test_util::{decode, encoded_rect, encoded_square};
    use tierdeck_core::compose::ComposeInput;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn request(
        orientation: Orientation,
        first: ImageSource,
        second: ImageSource,
    ) -> CompositionRequest {
        CompositionRequest {
            orientation,
            first: ComposeInput { source: first, label: String::new() },
            second: ComposeInput { source: second, label: String::new() },
        }
    }

    #[test]
    fn test_output_takes_first_image_dimensions() {
        for (w, h, sw, sh) in [(4u32, 4u32, 2u32, 2u32), (6, 2, 9, 9), (3, 5, 1, 1)] {
            let req = request(
                Orientation::Horizontal,
                encoded_rect(w, h, RED),
                encoded_rect(sw, sh, BLUE),
            );
            let out = decode(&compose(&req, &NullResolver).unwrap());
            assert_eq!((out.width(), out.height()), (w, h));
        }
    }

    #[test]
    fn test_horizontal_halves() {
        let req = request(
            Orientation::Horizontal,
            encoded_square(4, RED),
            encoded_square(2, BLUE),
        );
        let out = decode(&compose(&req, &NullResolver).unwrap()).to_rgba8();

        assert_eq!(out.get_pixel(0, 0).0, RED);
        assert_eq!(out.get_pixel(1, 3).0, RED);
        assert_eq!(out.get_pixel(2, 0).0, BLUE);
        assert_eq!(out.get_pixel(3, 3).0, BLUE);
    }

    #[test]
    fn test_vertical_halves() {
        let req = request(
            Orientation::Vertical,
            encoded_square(4, RED),
            encoded_square(2, BLUE),
        );
        let out = decode(&compose(&req, &NullResolver).unwrap()).to_rgba8();

        assert_eq!(out.get_pixel(0, 0).0, RED);
        assert_eq!(out.get_pixel(3, 1).0, RED);
        assert_eq!(out.get_pixel(0, 2).0, BLUE);
        assert_eq!(out.get_pixel(3, 3).0, BLUE);
    }

    #[test]
    fn test_odd_width_seam_truncates() {
        // 5 wide: the first image keeps columns 0-1, the second 2-4.
        let req = request(
            Orientation::Horizontal,
            encoded_rect(5, 3, RED),
            encoded_rect(5, 3, BLUE),
        );
        let out = decode(&compose(&req, &NullResolver).unwrap()).to_rgba8();

        assert_eq!(out.get_pixel(1, 1).0, RED);
        assert_eq!(out.get_pixel(2, 1).0, BLUE);
        assert_eq!(out.get_pixel(4, 1).0, BLUE);
    }

    #[test]
    fn test_result_is_png_encoded() {
        let req = request(
            Orientation::Horizontal,
            encoded_square(2, RED),
            encoded_square(2, BLUE),
        );
        let source = compose(&req, &NullResolver).unwrap();
        let bytes = source.data().unwrap();
        assert_eq!(ImageFormat::from_magic_bytes(&bytes), Some(ImageFormat::Png));
    }

    #[test]
    fn test_decode_failure_aborts() {
        let req = request(
            Orientation::Horizontal,
            encoded_square(2, RED),
            ImageSource::from_bytes(ImageFormat::Png, &[9, 9, 9]),
        );
        assert!(matches!(
            compose(&req, &NullResolver),
            Err(RenderError::Decode(_))
        ));
    }
}
