//! Encoded image bytes to pixel grids.

use std::path::Path;

use crate::ascii::PixelGrid;
use crate::error::GlyphError;

/// Decode PNG/JPEG/GIF/... bytes into an RGBA pixel grid.
///
/// The format is guessed from the data, not from any file name.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid, GlyphError> {
    let dyn_img = image::load_from_memory(bytes)?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Decoded {}x{} image from {} bytes", width, height, bytes.len());
    PixelGrid::from_rgba(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn open_image(path: &Path) -> Result<(Vec<u8>, PixelGrid), GlyphError> {
    let bytes = std::fs::read(path)?;
    let grid = decode_image(&bytes)?;
    Ok((bytes, grid))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::ascii::Rgb;

    fn png(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
        let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_png_dimensions_and_pixels() {
        let bytes = png(2, 1, vec![0, 0, 0, 255, 255, 128, 7, 255]);
        let grid = decode_image(&bytes).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.rgb_at(1, 0), Rgb::new(255, 128, 7));
    }

    #[test]
    fn test_decode_keeps_straight_alpha() {
        let bytes = png(1, 1, vec![100, 50, 200, 128]);
        let grid = decode_image(&bytes).unwrap();
        assert_eq!(grid.data(), &[100, 50, 200, 128]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(GlyphError::Decode(_))));
    }

    #[test]
    fn test_open_image_missing_file() {
        let result = open_image(Path::new("/nonexistent/glyphcast/input.png"));
        assert!(matches!(result, Err(GlyphError::Io(_))));
    }
}
