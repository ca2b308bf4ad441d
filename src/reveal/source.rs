//! Row-indexed text prepared for a reveal.

use crate::ascii::{GlyphGrid, TextFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
    /// Byte offset in `full` where this row ends (exclusive of `\n`)
    end: usize,
    /// Visible characters up to and including this row, counting the
    /// newlines between rows
    visible_total: usize,
}

/// Text to reveal, split into rows with per-row visible lengths.
///
/// Emitted prefixes always contain the markup intact; only the length
/// accounting ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealText {
    full: String,
    rows: Vec<Row>,
}

impl RevealText {
    /// Build from a glyph grid. Visible length is the cell count of each row,
    /// regardless of the markup the format adds.
    pub fn from_grid(grid: &GlyphGrid, format: TextFormat) -> Self {
        let rows = grid.row_texts(format);
        if rows.is_empty() {
            return Self::plain("");
        }
        Self::from_measured_rows(rows)
    }

    /// Plain text: every `char` is visible.
    pub fn plain(text: &str) -> Self {
        Self::from_measured_rows(text.split('\n').map(|row| (row.to_string(), row.chars().count())))
    }

    /// Markup-annotated text: tags, entities and ANSI escapes are measured
    /// by what they display.
    pub fn markup(text: &str) -> Self {
        Self::from_measured_rows(text.split('\n').map(|row| (row.to_string(), visible_len(row))))
    }

    fn from_measured_rows(rows: impl IntoIterator<Item = (String, usize)>) -> Self {
        let mut full = String::new();
        let mut measured = Vec::new();
        let mut visible_total = 0;
        for (i, (text, visible)) in rows.into_iter().enumerate() {
            if i > 0 {
                full.push('\n');
                visible_total += 1;
            }
            full.push_str(&text);
            visible_total += visible;
            measured.push(Row {
                end: full.len(),
                visible_total,
            });
        }
        Self {
            full,
            rows: measured,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.full
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The first `rows` rows joined by newlines.
    pub fn prefix(&self, rows: usize) -> &str {
        match rows {
            0 => "",
            n => &self.full[..self.row(n - 1).end],
        }
    }

    /// Visible length of [`prefix`](Self::prefix) for the same row count.
    pub fn prefix_visible_len(&self, rows: usize) -> usize {
        match rows {
            0 => 0,
            n => self.row(n - 1).visible_total,
        }
    }

    /// Visible length of the whole text.
    pub fn visible_len(&self) -> usize {
        self.prefix_visible_len(self.rows.len())
    }

    fn row(&self, index: usize) -> Row {
        self.rows[index.min(self.rows.len() - 1)]
    }
}

/// Count the characters a viewer would see.
///
/// Skips `<...>` tags and ANSI CSI sequences, and counts an `&name;`
/// entity as one character. A `<` or `&` that does not start a complete
/// tag or entity is counted as itself.
pub fn visible_len(text: &str) -> usize {
    let mut count = 0;
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        let special = match c {
            '<' => tag_len(rest).map(|len| (len, 0)),
            '&' => entity_len(rest).map(|len| (len, 1)),
            '\x1b' => csi_len(rest).map(|len| (len, 0)),
            _ => None,
        };
        let (consumed, visible) = special.unwrap_or((c.len_utf8(), 1));
        count += visible;
        rest = &rest[consumed..];
    }
    count
}

fn tag_len(s: &str) -> Option<usize> {
    let close = s[1..].find('>')?;
    (close > 0).then_some(close + 2)
}

fn entity_len(s: &str) -> Option<usize> {
    let semi = s[1..].find(';')?;
    let name = &s[1..1 + semi];
    let valid = !name.is_empty()
        && name.len() <= 10
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '#');
    valid.then_some(semi + 2)
}

fn csi_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix("\x1b[")?;
    let end = body.bytes().position(|b| (0x40..=0x7e).contains(&b))?;
    Some(2 + end + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_len_plain() {
        assert_eq!(visible_len("hello"), 5);
        assert_eq!(visible_len("░▒▓"), 3);
    }

    #[test]
    fn test_visible_len_strips_spans() {
        let row = "<span style=\"color: rgb(1,2,3)\">#</span><span style=\"color: rgb(4,5,6)\">.</span>";
        assert_eq!(visible_len(row), 2);
    }

    #[test]
    fn test_visible_len_counts_entities_once() {
        assert_eq!(visible_len("<span>&lt;</span>&amp;"), 2);
    }

    #[test]
    fn test_visible_len_lone_delimiters_are_visible() {
        assert_eq!(visible_len("a<b"), 3);
        assert_eq!(visible_len("<>"), 2);
        assert_eq!(visible_len("& x;"), 4);
    }

    #[test]
    fn test_visible_len_skips_ansi() {
        assert_eq!(visible_len("\x1b[38;2;1;2;3mx\x1b[0m"), 1);
    }

    #[test]
    fn test_plain_prefixes() {
        let text = RevealText::plain("ab\ncd\nef");
        assert_eq!(text.row_count(), 3);
        assert_eq!(text.prefix(0), "");
        assert_eq!(text.prefix(1), "ab");
        assert_eq!(text.prefix(2), "ab\ncd");
        assert_eq!(text.prefix(3), "ab\ncd\nef");
        assert_eq!(text.prefix_visible_len(2), 5);
        assert_eq!(text.visible_len(), 8);
    }

    #[test]
    fn test_markup_prefix_keeps_tags() {
        let text = RevealText::markup("<b>x</b>\n<b>y</b>");
        assert_eq!(text.prefix(1), "<b>x</b>");
        assert_eq!(text.prefix_visible_len(1), 1);
        assert_eq!(text.visible_len(), 3);
    }

    #[test]
    fn test_empty_text_has_one_empty_row() {
        let text = RevealText::plain("");
        assert_eq!(text.row_count(), 1);
        assert_eq!(text.full_text(), "");
        assert_eq!(text.visible_len(), 0);
    }

    #[test]
    fn test_trailing_newline_round_trips() {
        let text = RevealText::plain("ab\n");
        assert_eq!(text.row_count(), 2);
        assert_eq!(text.full_text(), "ab\n");
    }
}
