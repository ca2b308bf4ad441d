//! Glyph palette definitions.

use serde::{Deserialize, Serialize};

/// General purpose 13-level ramp.
pub const SIMPLE_CHARSET: &str = " .,-~:;=*!#$@";

/// Dense 71-level ramp for large output widths.
pub const DETAILED_CHARSET: &str =
    " .'`,^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// High contrast 11-level ramp.
pub const CONTRAST_CHARSET: &str = " .,:;|=+*#@";

/// Unicode shade blocks, full block first.
pub const BLOCKS_CHARSET: &str = "█▓▒░ ";

/// First sixteen braille patterns, empty pattern first.
pub const BRAILLE_CHARSET: &str = "⠀⠁⠂⠃⠄⠅⠆⠇⠈⠉⠊⠋⠌⠍⠎⠏";

/// Built-in palettes, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSet {
    #[default]
    Simple,
    Detailed,
    Contrast,
    Blocks,
    Braille,
}

impl CharSet {
    /// Every built-in palette in listing order.
    pub const ALL: [CharSet; 5] = [
        CharSet::Simple,
        CharSet::Detailed,
        CharSet::Contrast,
        CharSet::Blocks,
        CharSet::Braille,
    ];

    /// The glyph ramp for this palette, darkest-intended first.
    pub fn glyphs(&self) -> &'static str {
        match self {
            CharSet::Simple => SIMPLE_CHARSET,
            CharSet::Detailed => DETAILED_CHARSET,
            CharSet::Contrast => CONTRAST_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Braille => BRAILLE_CHARSET,
        }
    }

    /// Get a human-readable name for the charset.
    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Simple => "simple",
            CharSet::Detailed => "detailed",
            CharSet::Contrast => "contrast",
            CharSet::Blocks => "blocks",
            CharSet::Braille => "braille",
        }
    }

    /// Look up a built-in palette by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Ordered glyphs used as brightness buckets.
///
/// Index 0 is used for the darkest pixels and the last index for the
/// brightest. An empty palette can be built but is rejected at mapping time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphPalette {
    glyphs: Vec<char>,
}

impl GlyphPalette {
    pub fn new(glyphs: Vec<char>) -> Self {
        Self { glyphs }
    }

    /// Build a custom palette from a string, one glyph per `char`.
    pub fn custom(chars: &str) -> Self {
        Self::new(chars.chars().collect())
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The same glyphs in reverse order.
    pub fn reversed(&self) -> Self {
        Self::new(self.glyphs.iter().rev().copied().collect())
    }
}

impl Default for GlyphPalette {
    fn default() -> Self {
        CharSet::default().into()
    }
}

impl From<CharSet> for GlyphPalette {
    fn from(charset: CharSet) -> Self {
        Self::custom(charset.glyphs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lengths() {
        assert_eq!(GlyphPalette::from(CharSet::Simple).len(), 13);
        assert_eq!(GlyphPalette::from(CharSet::Detailed).len(), 71);
        assert_eq!(GlyphPalette::from(CharSet::Contrast).len(), 11);
        assert_eq!(GlyphPalette::from(CharSet::Blocks).len(), 5);
        assert_eq!(GlyphPalette::from(CharSet::Braille).len(), 16);
    }

    #[test]
    fn test_from_name_round_trips_every_charset() {
        for charset in CharSet::ALL {
            assert_eq!(CharSet::from_name(charset.name()), Some(charset));
        }
        assert_eq!(CharSet::from_name("standard"), None);
    }

    #[test]
    fn test_reversed() {
        let palette = GlyphPalette::custom("abc");
        assert_eq!(palette.reversed().glyphs(), &['c', 'b', 'a']);
    }

    #[test]
    fn test_custom_splits_unicode_by_char() {
        let palette = GlyphPalette::custom("░█");
        assert_eq!(palette.glyphs(), &['░', '█']);
    }

    #[test]
    fn test_default_is_simple() {
        assert_eq!(GlyphPalette::default(), GlyphPalette::custom(SIMPLE_CHARSET));
    }
}
