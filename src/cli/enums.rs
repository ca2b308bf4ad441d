//! CLI enum types for character set and color options.

use clap::ValueEnum;

use crate::ascii;

/// Built-in character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Simple,
    Detailed,
    Contrast,
    Blocks,
    Braille,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Simple => ascii::CharSet::Simple,
            CharacterSet::Detailed => ascii::CharSet::Detailed,
            CharacterSet::Contrast => ascii::CharSet::Contrast,
            CharacterSet::Blocks => ascii::CharSet::Blocks,
            CharacterSet::Braille => ascii::CharSet::Braille,
        }
    }
}

/// Per-character color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Color {
    #[default]
    None,
    Grayscale,
    Truecolor,
}

impl From<Color> for ascii::ColorMode {
    fn from(c: Color) -> Self {
        match c {
            Color::None => ascii::ColorMode::None,
            Color::Grayscale => ascii::ColorMode::Grayscale,
            Color::Truecolor => ascii::ColorMode::Truecolor,
        }
    }
}
