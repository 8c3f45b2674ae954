use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::Message;
use crate::core::presentation::{Presentation, StyleClass, present};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Terminal colors for each presentation style class.
pub fn style_for(class: StyleClass) -> Style {
    match class {
        StyleClass::Joy => Style::default().fg(Color::Yellow),
        StyleClass::Sadness => Style::default().fg(Color::Blue),
        StyleClass::Anger => Style::default().fg(Color::Red),
        StyleClass::Fear => Style::default().fg(Color::Magenta),
        StyleClass::Love => Style::default().fg(Color::LightMagenta),
        StyleClass::Surprise => Style::default().fg(Color::Indexed(208)),
        StyleClass::Crisis => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
        StyleClass::Neutral => Style::default().fg(Color::Gray),
    }
}

const USER_STYLE: Style = Style::new().fg(Color::Green);

/// A stateless component that renders one transcript record as a bubble.
///
/// User records are green. Assistant records take their colors from the
/// presentation mapping and get a label row (glyph + label) when the
/// mapping produces a label.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options that match `Paragraph` wrapping, so the message
/// list can lay out without rendering.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    presentation: Presentation,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self {
            message,
            presentation: present(message),
        }
    }

    /// The label row shown above the text, if any. User records never have one.
    fn label_row(message: &Message, presentation: &Presentation) -> Option<String> {
        if message.is_user() {
            return None;
        }
        presentation
            .label
            .map(|label| format!("{} {}", presentation.glyph, label))
    }

    fn title(&self) -> String {
        let time = self.message.timestamp.format("%H:%M");
        if self.message.is_user() {
            format!("you · {time}")
        } else {
            format!("{} mindmate · {time}", self.presentation.glyph)
        }
    }

    fn text_style(&self) -> Style {
        if self.message.is_user() {
            USER_STYLE
        } else {
            style_for(self.presentation.style)
        }
    }

    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row
            return 1;
        }

        let label_rows = u16::from(Self::label_row(message, &present(message)).is_some());

        let content = message.text.trim();
        if content.is_empty() {
            return label_rows + VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + label_rows + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.text_style();

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let mut inner = block.inner(area);
        block.render(area, buf);

        if let Some(label) = Self::label_row(self.message, &self.presentation)
            && inner.height > 0
        {
            let row = Rect { height: 1, ..inner };
            Line::from(Span::styled(
                label,
                style.add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ))
            .render(row, buf);
            inner.y += 1;
            inner.height -= 1;
        }

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
