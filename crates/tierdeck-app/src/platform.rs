//! Native platform operations: files, clipboard, dialogs.

use std::path::{Path, PathBuf};
use tierdeck_core::session::ExportFile;
use tierdeck_core::{ImageFormat, ImageSource, ManifestError};
use tierdeck_render::{RenderError, SourceResolver};

/// Resolves manifest-relative image URIs against an asset directory.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    /// Create a resolver rooted at an asset directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The asset root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceResolver for AssetResolver {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, RenderError> {
        let path = self.root.join(uri);
        std::fs::read(&path).map_err(|err| RenderError::Resolve {
            uri: uri.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Read manifest text from disk.
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|err| ManifestError::Fetch(format!("{}: {err}", path.display())))
}

/// Load an image file into an inline tile source.
///
/// The format is sniffed from the bytes first, with the extension as a
/// fallback; unsupported formats are rejected.
pub fn load_image_file(path: &Path) -> Result<ImageSource, String> {
    let bytes = std::fs::read(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let format = ImageFormat::from_magic_bytes(&bytes)
        .or_else(|| {
            path.extension()
                .and_then(|ext| ImageFormat::from_extension(&ext.to_string_lossy()))
        })
        .ok_or_else(|| format!("{}: not a supported image", path.display()))?;
    Ok(ImageSource::from_bytes(format, &bytes))
}

/// Pick image files with the native file dialog.
pub fn pick_image_files() -> Vec<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Add Images")
        .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
        .pick_files()
        .unwrap_or_default()
}

/// Paste an image from the clipboard as an inline tile source.
/// Returns `None` when the clipboard holds no image.
pub fn paste_image_from_clipboard() -> Option<ImageSource> {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(err) => {
            log::error!("failed to access clipboard: {err}");
            return None;
        }
    };
    let img_data = clipboard.get_image().ok()?;

    // arboard hands back raw RGBA; encode as PNG for storage.
    let width = img_data.width as u32;
    let height = img_data.height as u32;
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = match encoder.write_header() {
            Ok(writer) => writer,
            Err(err) => {
                log::error!("failed to encode clipboard image: {err}");
                return None;
            }
        };
        if let Err(err) = writer.write_image_data(&img_data.bytes) {
            log::error!("failed to encode clipboard image: {err}");
            return None;
        }
    }

    log::info!("pasted image from clipboard: {width}x{height}");
    Some(ImageSource::from_bytes(ImageFormat::Png, &png_data))
}

/// Write a finished export next to the given directory.
pub fn write_export(file: &ExportFile, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.png)?;
    log::info!("exported board to {}", path.display());
    Ok(path)
}

/// Write a finished export through the native save dialog.
/// Returns `None` when the user cancels.
pub fn save_export_dialog(file: &ExportFile) -> Option<PathBuf> {
    let dialog = rfd::FileDialog::new()
        .set_title("Save Board")
        .set_file_name(&file.filename)
        .add_filter("PNG Image", &["png"]);

    let path = dialog.save_file()?;
    match std::fs::write(&path, &file.png) {
        Ok(()) => {
            log::info!("exported board to {}", path.display());
            Some(path)
        }
        Err(err) => {
            log::error!("failed to write export: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_asset_resolver_reads_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let resolver = AssetResolver::new(dir.path());
        assert_eq!(resolver.fetch("a.png").unwrap(), vec![0x89, 0x50, 0x4E, 0x47]);
        assert!(matches!(
            resolver.fetch("missing.png"),
            Err(RenderError::Resolve { .. })
        ));
    }

    #[test]
    fn test_read_manifest_missing_file_is_fetch_error() {
        let err = read_manifest(Path::new("/nonexistent/manifest.txt")).unwrap_err();
        assert!(matches!(err, ManifestError::Fetch(_)));
    }

    #[test]
    fn test_load_image_file_sniffs_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.bin");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0]).unwrap();

        let source = load_image_file(&path).unwrap();
        assert!(matches!(
            source,
            ImageSource::Encoded { format: ImageFormat::Jpeg, .. }
        ));
    }

    #[test]
    fn test_load_image_file_rejects_unknown_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(load_image_file(&path).is_err());
    }

    #[test]
    fn test_write_export_uses_configured_filename() {
        let dir = tempfile::tempdir().unwrap();
        let file = ExportFile {
            filename: "tier-list.png".to_string(),
            png: vec![1, 2, 3],
        };
        let path = write_export(&file, dir.path()).unwrap();
        assert!(path.ends_with("tier-list.png"));
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
    }
}
