//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, Color};
use crate::ascii::{GlyphPalette, MapperConfig};
use crate::config::Config;

/// Turn images into ASCII art, optionally revealed row by row
#[derive(Parser, Debug)]
#[command(name = "glyphcast")]
#[command(version, about = "Image to ASCII art converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Convert a photo at 120 columns with true color
    glyphcast render photo.jpg --width 120 --color truecolor

    # Generate an image from a prompt and type it out
    glyphcast generate \"a lighthouse at dusk\" --animate --save-image lighthouse.png

    # Use a custom ramp, darkest first
    glyphcast render logo.png --chars \" .oO@\"")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image file
    Render {
        /// Image file (PNG, JPEG, GIF, ...)
        image: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Generate an image from a text prompt and convert it
    Generate {
        /// Description of the image to generate
        prompt: String,

        #[command(flatten)]
        render: RenderArgs,

        /// Save the generated image to this path
        #[arg(long)]
        save_image: Option<PathBuf>,
    },
    /// List built-in character sets
    Charsets,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Options shared by every command that produces glyph output.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Output width in characters
    #[arg(long, short)]
    pub width: Option<u32>,

    /// Built-in character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Custom characters, darkest first
    #[arg(long, conflicts_with = "charset")]
    pub chars: Option<String>,

    /// Reverse the character ramp (for light backgrounds)
    #[arg(long)]
    pub invert: bool,

    /// Per-character color
    #[arg(long)]
    pub color: Option<Color>,

    /// Reveal the output row by row
    #[arg(long)]
    pub animate: bool,

    /// Save the glyph text (HTML markup when colored) to this path
    #[arg(long)]
    pub save_text: Option<PathBuf>,
}

impl RenderArgs {
    /// Merge settings: CLI args > config file > built-in defaults.
    pub fn mapper_config(&self, config: &Config) -> MapperConfig {
        let base = config.mapper_config();
        let palette = match (&self.chars, self.charset) {
            (Some(chars), _) => GlyphPalette::custom(chars),
            (None, Some(charset)) => crate::ascii::CharSet::from(charset).into(),
            (None, None) => base.palette,
        };
        MapperConfig {
            target_width: self.width.unwrap_or(base.target_width),
            palette,
            inverted: self.invert || base.inverted,
            color_mode: self.color.map(Into::into).unwrap_or(base.color_mode),
        }
    }

    pub fn animate(&self, config: &Config) -> bool {
        self.animate || config.reveal.animate
    }
}
