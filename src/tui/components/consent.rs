//! # Consent Modal
//!
//! The disclaimer shown at startup and on F1.
//!
//! The first showing owns the keyboard: Enter or Esc dismisses it and
//! everything else is swallowed. Once acknowledged, reopening it is for
//! reading only: Esc or F1 closes it and every other key passes through.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MODAL_WIDTH: u16 = 72;
const MODAL_HEIGHT: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentEvent {
    Dismiss,
}

pub struct ConsentModal {
    /// Reopened after acknowledgment; does not capture input.
    pub review: bool,
}

impl ConsentModal {
    pub fn new(review: bool) -> Self {
        Self { review }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let footer = if self.review {
            "[ Esc / F1 ] Close"
        } else {
            "[ Enter ] I Understand, Continue"
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let warn = Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD);
        vec![
            Line::from(vec![
                Span::styled("MindMate is an AI chatbot", bold),
                Span::raw(" designed to provide emotional support and a listening ear."),
            ]),
            Line::raw(""),
            Line::styled(
                "⚠️  This is NOT a substitute for professional mental health care.",
                warn,
            ),
            Line::raw(""),
            Line::styled(
                "If you're experiencing a mental health crisis or having thoughts of self-harm:",
                bold,
            ),
            Line::raw("  • Call emergency services (112 in India, 911 in US)"),
            Line::raw("  • Contact AASRA: 91-9820466726 (India, 24/7)"),
            Line::raw("  • Reach out to a licensed therapist or counselor"),
            Line::raw(""),
            Line::styled(
                "By continuing, you acknowledge that you understand this is an AI tool and not professional therapy.",
                Style::default().fg(Color::DarkGray),
            ),
            Line::raw(""),
            Line::styled(
                footer,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]
    }

    /// Centered rect for the modal, shrunk to fit small terminals.
    pub fn area(outer: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(MODAL_HEIGHT.min(outer.height))])
            .flex(Flex::Center)
            .areas(outer);
        let [area] = Layout::horizontal([Constraint::Length(MODAL_WIDTH.min(outer.width))])
            .flex(Flex::Center)
            .areas(row);
        area
    }
}

impl Component for ConsentModal {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let modal = Self::area(area);
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Important Disclaimer ")
            .padding(Padding::uniform(1));
        let block = if self.review {
            block
        } else {
            block.title_bottom(" F1 to reopen ")
        };

        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(self.lines())
                .block(block)
                .wrap(Wrap { trim: false }),
            modal,
        );
    }
}

impl EventHandler for ConsentModal {
    type Event = ConsentEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match (self.review, event) {
            (false, TuiEvent::Submit | TuiEvent::Escape) => Some(ConsentEvent::Dismiss),
            (true, TuiEvent::Escape | TuiEvent::ShowDisclaimer) => Some(ConsentEvent::Dismiss),
            _ => None,
        }
    }
}
