//! Shared helpers for the render test suites.

use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;
use tierdeck_core::{ImageFormat, ImageSource};

/// Encode a solid-color image as an inline PNG source.
pub fn encoded_rect(width: u32, height: u32, color: [u8; 4]) -> ImageSource {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    ImageSource::from_bytes(ImageFormat::Png, &bytes)
}

/// Square variant of [`encoded_rect`].
pub fn encoded_square(size: u32, color: [u8; 4]) -> ImageSource {
    encoded_rect(size, size, color)
}

/// Decode an inline source back into pixels.
pub fn decode(source: &ImageSource) -> DynamicImage {
    image::load_from_memory(&source.data().unwrap()).unwrap()
}
