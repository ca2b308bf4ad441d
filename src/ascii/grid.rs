//! Glyph grid and its text serializations.

use std::fmt::Write;

use super::mapping::ColorMode;
use super::pixels::Rgb;

/// ANSI reset sequence appended to colored rows.
pub const ANSI_RESET: &str = "\x1b[0m";

/// A single output glyph with an optional color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub glyph: char,
    pub color: Option<Rgb>,
}

/// How a glyph grid is written out as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Glyphs only, colors dropped
    #[default]
    Plain,
    /// One `<span style="color: rgb(..)">` per colored cell
    Html,
    /// 24-bit ANSI foreground escapes for terminals
    Ansi,
}

impl TextFormat {
    /// The format used for exported text: markup when colored.
    pub fn for_export(color_mode: ColorMode) -> Self {
        if color_mode.is_colored() {
            TextFormat::Html
        } else {
            TextFormat::Plain
        }
    }

    /// The format used when printing to a terminal.
    pub fn for_terminal(color_mode: ColorMode) -> Self {
        if color_mode.is_colored() {
            TextFormat::Ansi
        } else {
            TextFormat::Plain
        }
    }
}

/// Mapped output: `height` rows of exactly `width` cells in raster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    width: u32,
    rows: Vec<Vec<GlyphCell>>,
}

impl GlyphGrid {
    pub(crate) fn new(width: u32, rows: Vec<Vec<GlyphCell>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == width as usize));
        Self { width, rows }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn rows(&self) -> &[Vec<GlyphCell>] {
        &self.rows
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<&GlyphCell> {
        self.rows.get(y as usize)?.get(x as usize)
    }

    /// Serialize as plain text for `ColorMode::None`, HTML markup otherwise.
    pub fn render(&self, color_mode: ColorMode) -> String {
        self.render_as(TextFormat::for_export(color_mode))
    }

    /// Rows joined by `\n`, no trailing newline.
    pub fn render_as(&self, format: TextFormat) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write_row(&mut out, row, format);
        }
        out
    }

    pub fn to_plain(&self) -> String {
        self.render_as(TextFormat::Plain)
    }

    pub fn to_markup(&self) -> String {
        self.render_as(TextFormat::Html)
    }

    pub fn to_ansi(&self) -> String {
        self.render_as(TextFormat::Ansi)
    }

    /// Each row serialized on its own, paired with its visible glyph count.
    pub fn row_texts(&self, format: TextFormat) -> Vec<(String, usize)> {
        self.rows
            .iter()
            .map(|row| {
                let mut text = String::new();
                write_row(&mut text, row, format);
                (text, row.len())
            })
            .collect()
    }
}

fn write_row(out: &mut String, row: &[GlyphCell], format: TextFormat) {
    match format {
        TextFormat::Plain => out.extend(row.iter().map(|c| c.glyph)),
        TextFormat::Html => {
            for cell in row {
                match cell.color {
                    Some(Rgb { r, g, b }) => {
                        let _ = write!(out, "<span style=\"color: rgb({},{},{})\">", r, g, b);
                        push_escaped(out, cell.glyph);
                        out.push_str("</span>");
                    }
                    None => push_escaped(out, cell.glyph),
                }
            }
        }
        TextFormat::Ansi => {
            let mut colored = false;
            for cell in row {
                if let Some(Rgb { r, g, b }) = cell.color {
                    let _ = write!(out, "\x1b[38;2;{};{};{}m", r, g, b);
                    colored = true;
                }
                out.push(cell.glyph);
            }
            if colored {
                out.push_str(ANSI_RESET);
            }
        }
    }
}

/// Glyphs such as `<` appear in the built-in ramps; escape them so the
/// markup stays balanced.
fn push_escaped(out: &mut String, glyph: char) {
    match glyph {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(glyph: char, color: Option<Rgb>) -> GlyphCell {
        GlyphCell { glyph, color }
    }

    #[test]
    fn test_plain_rows_joined_without_trailing_newline() {
        let grid = GlyphGrid::new(2, vec![vec![cell('a', None), cell('b', None)]; 2]);
        assert_eq!(grid.to_plain(), "ab\nab");
    }

    #[test]
    fn test_markup_span_per_cell() {
        let grid = GlyphGrid::new(1, vec![vec![cell('#', Some(Rgb::new(12, 34, 56)))]]);
        assert_eq!(
            grid.to_markup(),
            "<span style=\"color: rgb(12,34,56)\">#</span>"
        );
    }

    #[test]
    fn test_markup_escapes_angle_brackets() {
        let grid = GlyphGrid::new(
            2,
            vec![vec![cell('<', Some(Rgb::new(1, 1, 1))), cell('&', None)]],
        );
        assert_eq!(
            grid.to_markup(),
            "<span style=\"color: rgb(1,1,1)\">&lt;</span>&amp;"
        );
    }

    #[test]
    fn test_ansi_resets_colored_rows_only() {
        let grid = GlyphGrid::new(
            1,
            vec![vec![cell('x', Some(Rgb::new(1, 2, 3)))], vec![cell('y', None)]],
        );
        assert_eq!(grid.to_ansi(), "\x1b[38;2;1;2;3mx\x1b[0m\ny");
    }

    #[test]
    fn test_render_picks_format_from_color_mode() {
        let grid = GlyphGrid::new(1, vec![vec![cell('x', Some(Rgb::new(9, 9, 9)))]]);
        assert_eq!(grid.render(ColorMode::None), "x");
        assert!(grid.render(ColorMode::Grayscale).starts_with("<span"));
    }

    #[test]
    fn test_row_texts_report_visible_width() {
        let grid = GlyphGrid::new(
            2,
            vec![vec![cell('a', Some(Rgb::new(0, 0, 0))), cell('b', Some(Rgb::new(0, 0, 0)))]],
        );
        let rows = grid.row_texts(TextFormat::Html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1, 2);
        assert!(rows[0].0.len() > 2);
    }
}
