//! CPU board rasterizer: the capture behind export and share.

use crate::decode::{decode_source, SourceResolver};
use crate::RenderError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba as Pixel, RgbaImage};
use std::io::Cursor;
use tierdeck_core::{Board, Rgba, RowId, Settings};

/// Strip colors for tier rows, cycling top to bottom.
const TIER_STRIP_COLORS: [Rgba; 5] = [
    Rgba::new(0xff, 0x7f, 0x7f, 0xff),
    Rgba::new(0xff, 0xbf, 0x7f, 0xff),
    Rgba::new(0xff, 0xdf, 0x80, 0xff),
    Rgba::new(0xbe, 0xff, 0x7f, 0xff),
    Rgba::new(0x7f, 0xbf, 0xff, 0xff),
];

/// Strip color for the pool row.
const POOL_STRIP_COLOR: Rgba = Rgba::new(0xcc, 0xcc, 0xcc, 0xff);

/// Capture geometry and fill, in unscaled layout units.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Background fill behind rows and gaps.
    pub background: Rgba,
    /// Device-pixel scale factor applied to every metric.
    pub scale: f64,
    /// Square cell size a tile is fitted into.
    pub cell_size: u32,
    /// Gap between cells and rows.
    pub gap: u32,
    /// Width of the colored rank strip at the left edge of each row.
    pub strip_width: u32,
}

impl ExportOptions {
    /// Capture options from session settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            background: settings.capture_background,
            scale: settings.capture_scale,
            cell_size: 96,
            gap: 8,
            strip_width: 40,
        }
    }

    fn scaled(&self, value: u32) -> u32 {
        (f64::from(value) * self.scale).round().max(1.0) as u32
    }
}

/// A finished capture.
#[derive(Debug, Clone)]
pub struct ExportBitmap {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded pixels.
    pub png: Vec<u8>,
}

/// Rasterize the whole board.
///
/// Rows are stacked top to bottom in board order, each with its rank strip
/// on the left and its tiles fitted into uniform cells left to right. Any
/// tile that fails to decode fails the capture, mirroring a failed
/// screenshot.
pub fn render_board(
    board: &Board,
    resolver: &dyn SourceResolver,
    options: &ExportOptions,
) -> Result<ExportBitmap, RenderError> {
    let cell = options.scaled(options.cell_size);
    let gap = options.scaled(options.gap);
    let strip = options.scaled(options.strip_width);

    let columns = board.rows().map(|(_, row)| row.len()).max().unwrap_or(0).max(1) as u32;
    let row_count = board.rows().count() as u32;
    let width = strip + gap + columns * (cell + gap) + gap;
    let height = row_count * (cell + gap) + gap;

    let background = pixel(options.background);
    let mut out = RgbaImage::from_pixel(width, height, background);

    for (index, (row_id, row)) in board.rows().enumerate() {
        let y = gap + index as u32 * (cell + gap);
        fill_rect(&mut out, 0, y, strip, cell, pixel(strip_color(row_id)));

        for (column, tile) in row.tiles.iter().enumerate() {
            let decoded = decode_source(&tile.source, resolver)?.to_rgba8();
            let (fit_w, fit_h) = fit_within(decoded.dimensions(), cell, cell);
            let resized = imageops::resize(&decoded, fit_w, fit_h, FilterType::Triangle);

            let x = strip + gap + column as u32 * (cell + gap);
            let dx = i64::from(x + (cell - fit_w) / 2);
            let dy = i64::from(y + (cell - fit_h) / 2);
            imageops::overlay(&mut out, &resized, dx, dy);
        }
    }

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(out)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|err| RenderError::Encode(err.to_string()))?;

    log::info!("captured board as {width}x{height} PNG ({} bytes)", png.len());
    Ok(ExportBitmap { width, height, png })
}

fn strip_color(row: RowId) -> Rgba {
    match row {
        RowId::Pool => POOL_STRIP_COLOR,
        RowId::Tier(index) => TIER_STRIP_COLORS[index % TIER_STRIP_COLORS.len()],
    }
}

fn pixel(color: Rgba) -> Pixel<u8> {
    Pixel([color.r, color.g, color.b, color.a])
}

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Pixel<u8>) {
    for py in y..(y + h).min(image.height()) {
        for px in x..(x + w).min(image.width()) {
            image.put_pixel(px, py, color);
        }
    }
}

/// Scale source dimensions to fit a box while preserving aspect ratio.
fn fit_within((src_w, src_h): (u32, u32), max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (1, 1);
    }
    let aspect = f64::from(src_w) / f64::from(src_h);
    let target_aspect = f64::from(max_w) / f64::from(max_h);

    let (w, h) = if aspect > target_aspect {
        (f64::from(max_w), f64::from(max_w) / aspect)
    } else {
        (f64::from(max_h) * aspect, f64::from(max_h))
    };
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::NullResolver;
    use crate::test_util::encoded_square;
    use tierdeck_core::ImageSource;

    fn options() -> ExportOptions {
        ExportOptions {
            background: Rgba::from_hex("#f2f2f2").unwrap(),
            scale: 1.0,
            cell_size: 10,
            gap: 2,
            strip_width: 8,
        }
    }

    fn small_board() -> Board {
        let mut board = Board::new();
        let tile = board.mint_tile(encoded_square(4, [255, 0, 0, 255]), "a");
        board.insert_at_tail(RowId::Pool, tile);
        let tile = board.mint_tile(encoded_square(4, [0, 255, 0, 255]), "b");
        let s = board.tier_by_name("S").unwrap();
        board.insert_at_tail(s, tile);
        board
    }

    #[test]
    fn test_fit_within_preserves_aspect() {
        assert_eq!(fit_within((1000, 500), 400, 400), (400, 200));
        assert_eq!(fit_within((500, 1000), 400, 400), (200, 400));
        assert_eq!(fit_within((10, 10), 96, 96), (96, 96));
        assert_eq!(fit_within((0, 7), 96, 96), (1, 1));
    }

    #[test]
    fn test_capture_layout_and_background() {
        let board = small_board();
        let options = options();
        let bitmap = render_board(&board, &NullResolver, &options).unwrap();

        // 6 rows, widest row has 1 tile.
        assert_eq!(bitmap.width, 8 + 2 + (10 + 2) + 2);
        assert_eq!(bitmap.height, 6 * (10 + 2) + 2);

        let decoded = image::load_from_memory(&bitmap.png).unwrap().to_rgba8();
        assert_eq!((decoded.width(), decoded.height()), (bitmap.width, bitmap.height));
        // Top-left gap pixel keeps the background fill.
        assert_eq!(decoded.get_pixel(0, 0).0, [0xf2, 0xf2, 0xf2, 0xff]);
        // Pool strip starts at the first row band.
        assert_eq!(decoded.get_pixel(0, 2).0, [0xcc, 0xcc, 0xcc, 0xff]);
    }

    #[test]
    fn test_capture_scale_factor() {
        let board = small_board();
        let mut options = options();
        options.scale = 2.0;
        let bitmap = render_board(&board, &NullResolver, &options).unwrap();
        assert_eq!(bitmap.width, 16 + 4 + (20 + 4) + 4);
        assert_eq!(bitmap.height, 6 * (20 + 4) + 4);
    }

    #[test]
    fn test_unresolvable_tile_fails_capture() {
        let mut board = Board::new();
        let tile = board.mint_tile(ImageSource::Uri("missing.png".to_string()), "");
        board.insert_at_tail(RowId::Pool, tile);

        assert!(matches!(
            render_board(&board, &NullResolver, &options()),
            Err(RenderError::Resolve { .. })
        ));
    }

    #[test]
    fn test_empty_board_still_captures() {
        let board = Board::new();
        let bitmap = render_board(&board, &NullResolver, &options()).unwrap();
        assert!(bitmap.width > 0 && bitmap.height > 0);
    }
}
