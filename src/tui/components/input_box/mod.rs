//! # InputBox Component
//!
//! Multi-line text entry for the conversation.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J newline)
//! - Handle editing (backspace, delete, cursor left/right/home/end)
//! - Handle submission (Enter), clearing the buffer
//! - Dim and hold submissions while a reply is pending
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `busy` and `focused` are props
//! set by the event loop each frame.

mod text_wrap;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_row_col,
    inner_width, layout_rows, next_char_boundary, prev_char_boundary,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// A reply is pending: render dimmed and hold Enter (Prop)
    pub busy: bool,
    /// Whether keystrokes currently reach this box (Prop)
    pub focused: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Row offset for internal scrolling (0 when content fits)
    scroll_offset: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            busy: false,
            focused: true,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    /// Calculate required height for current buffer content, clamped to viewport limits.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let rows = layout_rows(&self.buffer, inner_width(content_width)).len();
        let visible = u16::try_from(rows)
            .unwrap_or(MAX_VISIBLE_LINES)
            .min(MAX_VISIBLE_LINES);
        visible + VERTICAL_OVERHEAD
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn title(&self) -> &'static str {
        if self.busy {
            "Waiting for MindMate..."
        } else {
            "Message (Enter to send, Ctrl+J for newline)"
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let rows = layout_rows(&self.buffer, width);
        let (cursor_row, cursor_col) = cursor_row_col(&self.buffer, &rows, self.cursor);

        // Keep the cursor row inside the visible window
        let visible_rows = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        let cursor_row = u16::try_from(cursor_row).unwrap_or(u16::MAX);
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + visible_rows {
            self.scroll_offset = cursor_row + 1 - visible_rows;
        }

        let lines: Vec<Line> = rows
            .iter()
            .skip(usize::from(self.scroll_offset))
            .take(usize::from(visible_rows))
            .map(|r| Line::raw(&self.buffer[r.start..r.end]))
            .collect();

        let mut style = Style::default().fg(Color::Green);
        if self.busy || !self.focused {
            style = style.add_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(self.title())
            .border_style(style);

        frame.render_widget(Paragraph::new(lines).block(block).style(style), area);

        if self.focused {
            let col = cursor_col.min(width.saturating_sub(1));
            frame.set_cursor_position(Position {
                x: area.x + CONTENT_OFFSET_X + col,
                y: area.y + CONTENT_OFFSET_Y + (cursor_row - self.scroll_offset),
            });
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_str(&text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if self.busy || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    fn render_to_text(input: &mut InputBox, w: u16, h: u16) -> String {
        let backend = TestBackend::new(w, h);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_input_box_new() {
        let input = InputBox::new();
        assert!(input.buffer.is_empty());
        assert!(!input.busy);
        assert!(input.focused);
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut input = typed("hello");
        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "hello"),
            other => panic!("Expected Submit event, got {other:?}"),
        }
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut input = typed("   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_submit_while_busy_keeps_buffer() {
        let mut input = typed("hold on");
        input.busy = true;
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "hold on");

        input.busy = false;
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("hold on".into()))
        );
    }

    #[test]
    fn test_ctrl_j_newline_is_kept() {
        let mut input = typed("line one");
        input.handle_event(&TuiEvent::InputChar('\n'));
        input.handle_event(&TuiEvent::Paste("line two".into()));
        assert_eq!(input.buffer, "line one\nline two");
        assert_eq!(input.calculate_height(80), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("a\r\nb\rc".into()));
        assert_eq!(input.buffer, "a\nb\nc");
    }

    #[test]
    fn test_cursor_editing() {
        let mut input = typed("ac");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "abc");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");

        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::InputChar('d'));
        assert_eq!(input.buffer, "bcd");
    }

    #[test]
    fn test_editing_multibyte() {
        let mut input = typed("héllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hllo");
    }

    #[test]
    fn test_boundaries_emit_nothing() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorLeft), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorRight), None);
    }

    #[test]
    fn test_height_is_clamped() {
        let input = typed(&"x\n".repeat(20));
        assert_eq!(input.calculate_height(80), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
        assert_eq!(InputBox::new().calculate_height(80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_shows_text_and_title() {
        let mut input = typed("how are you");
        let text = render_to_text(&mut input, 60, 3);
        assert!(text.contains("how are you"));
        assert!(text.contains("Enter to send"));
    }

    #[test]
    fn test_render_busy_title() {
        let mut input = InputBox::new();
        input.busy = true;
        let text = render_to_text(&mut input, 60, 3);
        assert!(text.contains("Waiting for MindMate"));
    }

    #[test]
    fn test_render_scrolls_to_cursor() {
        let mut input = typed("1\n2\n3\n4\n5\n6\n7");
        let text = render_to_text(&mut input, 20, 7);
        assert!(text.contains('7'));
        assert!(!text.contains('1'));
    }
}
