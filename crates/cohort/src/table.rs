use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::color;

/// Cells wider than this are shortened with "...".
const MAX_CELL_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Accent,
    Muted,
    Good,
    Warn,
    Danger,
}

impl Style {
    fn apply(self, text: &str) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Accent => color::accent(text),
            Style::Muted => color::muted(text),
            Style::Good => color::good(text),
            Style::Warn => color::warn(text),
            Style::Danger => color::danger(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    style: Style,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::Plain)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: truncate(&text.into(), MAX_CELL_WIDTH),
            style,
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::plain(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::plain(text)
    }
}

/// Box-drawn table sized to its widest cell per column.
pub struct TableFormatter {
    headers: Vec<&'static str>,
    widths: Vec<usize>,
}

impl TableFormatter {
    pub fn new(headers: &[&'static str], rows: &[Vec<Cell>]) -> Self {
        // Minimum widths = header label lengths
        let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(&cell.text));
            }
        }
        Self {
            headers: headers.to_vec(),
            widths,
        }
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn print_table(&self, rows: &[Vec<Cell>]) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!("{}", self.header_row());
        println!("{}", self.border('├', '┼', '┤'));
        for row in rows {
            println!("{}", self.row(row));
        }
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        color::muted(&format!(
            "{}{}{}",
            left,
            segments.join(&middle.to_string()),
            right
        ))
    }

    fn header_row(&self) -> String {
        let cells: Vec<String> = self
            .headers
            .iter()
            .zip(&self.widths)
            .map(|(header, width)| color::bold(&pad(header, *width)))
            .collect();
        self.join_cells(cells)
    }

    fn row(&self, row: &[Cell]) -> String {
        let cells: Vec<String> = self
            .widths
            .iter()
            .enumerate()
            .map(|(i, width)| match row.get(i) {
                Some(cell) => cell.style.apply(&pad(&cell.text, *width)),
                None => pad("", *width),
            })
            .collect();
        self.join_cells(cells)
    }

    fn join_cells(&self, cells: Vec<String>) -> String {
        let sep = color::muted("│");
        let mut line = sep.clone();
        for cell in cells {
            line.push(' ');
            line.push_str(&cell);
            line.push(' ');
            line.push_str(&sep);
        }
        line
    }
}

/// Compute the terminal display width of a string.
///
/// Wide characters (CJK, emoji) count as 2 columns.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad a string to a minimum display width without truncating.
pub(crate) fn pad(s: &str, min_width: usize) -> String {
    let width = display_width(s);
    if width >= min_width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(min_width - width))
    }
}

/// Shorten `s` to at most `max_width` display columns, ending in "...".
pub(crate) fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_shorter_than_width() {
        assert_eq!(pad("hi", 5), "hi   ");
    }

    #[test]
    fn test_pad_longer_than_width() {
        assert_eq!(pad("hello world", 5), "hello world");
    }

    #[test]
    fn test_display_width_cjk() {
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("Alpha", 10), "Alpha");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("University of the Witwatersrand", 15), "University o...");
    }

    #[test]
    fn test_truncate_wide_chars_respects_columns() {
        let result = truncate("日本語テスト", 7);
        assert_eq!(result, "日本...");
        assert!(display_width(&result) <= 7);
    }

    #[test]
    fn test_widths_follow_widest_cell() {
        let rows = vec![
            vec![Cell::plain("Data Science"), Cell::plain("12")],
            vec![Cell::plain("AI"), Cell::plain("1234567")],
        ];
        let table = TableFormatter::new(&["Program", "Total"], &rows);
        assert_eq!(table.widths(), &[12, 7]);
    }

    #[test]
    fn test_widths_never_below_header() {
        let rows = vec![vec![Cell::plain("A"), Cell::plain("1")]];
        let table = TableFormatter::new(&["Program", "Total"], &rows);
        assert_eq!(table.widths(), &[7, 5]);
    }

    #[test]
    fn test_long_cells_are_capped() {
        let long = "x".repeat(80);
        let rows = vec![vec![Cell::plain(long)]];
        let table = TableFormatter::new(&["Email"], &rows);
        assert_eq!(table.widths(), &[MAX_CELL_WIDTH]);
    }
}
