//! Image to glyph mapping.
//!
//! Converts decoded pixel data to a grid of glyphs:
//!
//! 1. **Resampling** - box filter down to `target_width` columns, with the
//!    row count derived from the aspect ratio
//! 2. **Quantization** - unweighted RGB mean picks a palette bucket
//! 3. **Color annotation** - optional gray or true color per cell
//!
//! # Character Sets
//!
//! Five built-in palettes are available via [`CharSet`]:
//! - `Simple` - 13-level ASCII ramp (default)
//! - `Detailed` - 71-level ASCII ramp
//! - `Contrast` - 11-level high contrast ramp
//! - `Blocks` - Unicode shade blocks
//! - `Braille` - braille dot patterns
//!
//! Any other string can be used through [`GlyphPalette::custom`].

mod charset;
mod dimensions;
mod downsample;
mod grid;
mod mapping;
mod pixels;

pub use charset::{
    CharSet, GlyphPalette, BLOCKS_CHARSET, BRAILLE_CHARSET, CONTRAST_CHARSET, DETAILED_CHARSET,
    SIMPLE_CHARSET,
};
pub use dimensions::output_height;
pub use downsample::resample;
pub use grid::{GlyphCell, GlyphGrid, TextFormat, ANSI_RESET};
pub use mapping::{glyph_index, map_image, ColorMode, MapperConfig, DEFAULT_WIDTH};
pub use pixels::{PixelGrid, Rgb};
