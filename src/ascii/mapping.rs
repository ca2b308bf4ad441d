//! Brightness to glyph mapping.

use serde::{Deserialize, Serialize};

use super::charset::GlyphPalette;
use super::dimensions::output_height;
use super::downsample::resample;
use super::grid::{GlyphCell, GlyphGrid};
use super::pixels::{PixelGrid, Rgb};
use crate::error::GlyphError;

/// Default output width in glyph columns.
pub const DEFAULT_WIDTH: u32 = 100;

/// Per-cell color annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Glyphs only
    #[default]
    None,
    /// Gray derived from the cell brightness
    Grayscale,
    /// The sampled pixel color
    Truecolor,
}

impl ColorMode {
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::None => "none",
            ColorMode::Grayscale => "grayscale",
            ColorMode::Truecolor => "truecolor",
        }
    }

    pub fn is_colored(&self) -> bool {
        !matches!(self, ColorMode::None)
    }
}

/// Everything that controls a single mapping call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    pub target_width: u32,
    pub palette: GlyphPalette,
    pub inverted: bool,
    pub color_mode: ColorMode,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_WIDTH,
            palette: GlyphPalette::default(),
            inverted: false,
            color_mode: ColorMode::None,
        }
    }
}

impl MapperConfig {
    /// Check the config without touching any pixels.
    pub fn validate(&self) -> Result<(), GlyphError> {
        if self.target_width == 0 {
            return Err(GlyphError::InvalidConfig(
                "target width must be greater than 0".to_string(),
            ));
        }
        if self.palette.is_empty() {
            return Err(GlyphError::InvalidConfig("palette is empty".to_string()));
        }
        Ok(())
    }
}

/// Palette index for a brightness value.
///
/// `floor(brightness / 255 * (levels - 1))`, clamped to the palette. The
/// operation order matters: it reproduces the same floating point result
/// for every input, including the bucket edges.
#[inline]
pub fn glyph_index(brightness: f64, levels: usize) -> usize {
    if levels <= 1 {
        return 0;
    }
    let max = levels - 1;
    let idx = (brightness / 255.0 * max as f64).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(max)
    }
}

/// Map an image to a glyph grid.
///
/// The image is resampled to `config.target_width` columns and a height
/// that keeps its aspect ratio, then each cell is quantized against the
/// palette (reversed once up front when `config.inverted` is set).
///
/// # Errors
/// `GlyphError::InvalidConfig` for a zero width or an empty palette,
/// `GlyphError::InvalidImage` for an image without pixels.
///
/// # Example
/// ```ignore
/// let config = MapperConfig { target_width: 2, palette: GlyphPalette::custom(" #"), ..Default::default() };
/// let grid = map_image(&pixels, &config)?;
/// assert_eq!(grid.to_plain(), " #");
/// ```
pub fn map_image(frame: &PixelGrid, config: &MapperConfig) -> Result<GlyphGrid, GlyphError> {
    config.validate()?;
    frame.ensure_non_empty()?;

    let width = config.target_width;
    let height = output_height(frame.width(), frame.height(), width);
    log::debug!(
        "Mapping {}x{} image to {}x{} glyphs ({} levels, inverted={}, color={})",
        frame.width(),
        frame.height(),
        width,
        height,
        config.palette.len(),
        config.inverted,
        config.color_mode.name()
    );

    let palette = if config.inverted {
        config.palette.reversed()
    } else {
        config.palette.clone()
    };
    let glyphs = palette.glyphs();

    let cells = resample(frame, width, height);
    let rows = cells
        .chunks_exact(width as usize)
        .map(|row| {
            row.iter()
                .map(|&pixel| map_cell(pixel, glyphs, config.color_mode))
                .collect()
        })
        .collect();

    Ok(GlyphGrid::new(width, rows))
}

fn map_cell(pixel: Rgb, glyphs: &[char], color_mode: ColorMode) -> GlyphCell {
    let brightness = pixel.brightness();
    let glyph = glyphs[glyph_index(brightness, glyphs.len())];
    let color = match color_mode {
        ColorMode::None => None,
        ColorMode::Grayscale => {
            let gray = brightness.floor() as u8;
            Some(Rgb::new(gray, gray, gray))
        }
        ColorMode::Truecolor => Some(pixel),
    };
    GlyphCell { glyph, color }
}
