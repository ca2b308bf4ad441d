//! glyphcast library crate.
//!
//! Maps decoded images to glyph grids and reveals the rendered text
//! progressively. The binary in `main.rs` is a thin shell over [`cli`].

pub mod ascii;
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod generator;
pub mod provider;
pub mod reveal;

pub use error::GlyphError;
