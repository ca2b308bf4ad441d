//! Decoded RGBA pixel data.

use crate::error::GlyphError;

/// An RGB triple, used both for sampled pixels and for cell colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unweighted channel mean, no gamma.
    pub fn brightness(&self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }
}

/// Immutable row-major RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wrap an RGBA8 buffer.
    ///
    /// # Errors
    /// Returns `GlyphError::InvalidImage` if `data` is not exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, GlyphError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(GlyphError::InvalidImage {
                width,
                height,
                reason: format!("expected {} bytes of RGBA data, got {}", expected, data.len()),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a fully opaque grid from RGB pixels in row-major order.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Rgb]) -> Result<Self, GlyphError> {
        let data = pixels.iter().flat_map(|p| [p.r, p.g, p.b, 255]).collect();
        Self::from_rgba(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The color channels of the pixel at `(x, y)`. Alpha is dropped.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    pub(crate) fn ensure_non_empty(&self) -> Result<(), GlyphError> {
        if self.width == 0 || self.height == 0 {
            return Err(GlyphError::InvalidImage {
                width: self.width,
                height: self.height,
                reason: "image has no pixels".to_string(),
            });
        }
        Ok(())
    }
}
