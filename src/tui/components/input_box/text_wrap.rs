//! Pure text layout helpers and dimensional constants for the InputBox.
//!
//! The input box lays text out itself (character wrapping by display width)
//! instead of leaning on `Paragraph` wrapping, so the cursor position and the
//! rendered rows always agree.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to the first content column (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Offset from area edge to the first content row (border)
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// Calculate the inner content width after subtracting border/padding overhead.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Byte range of one visual row within the buffer. Excludes the newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Split `text` into visual rows no wider than `width` display columns.
///
/// Always returns at least one row. A trailing newline produces a trailing
/// empty row, so the cursor has somewhere to sit.
pub(super) fn layout_rows(text: &str, width: u16) -> Vec<Row> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let mut row_start = line_start;
        let mut col = 0;
        for (i, c) in line.char_indices() {
            let w = c.width().unwrap_or(0);
            if col > 0 && col + w > width {
                rows.push(Row {
                    start: row_start,
                    end: line_start + i,
                });
                row_start = line_start + i;
                col = 0;
            }
            col += w;
        }
        rows.push(Row {
            start: row_start,
            end: line_start + line.len(),
        });
        line_start += line.len() + 1;
    }

    rows
}

/// Visual (row, column) of byte offset `pos`.
///
/// At a soft wrap the cursor belongs to the start of the next row.
pub(super) fn cursor_row_col(text: &str, rows: &[Row], pos: usize) -> (usize, u16) {
    let row = rows
        .iter()
        .rposition(|r| r.start <= pos)
        .unwrap_or(0);
    let start = rows.get(row).map_or(0, |r| r.start);
    let col = text[start..pos].width();
    (row, u16::try_from(col).unwrap_or(u16::MAX))
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
