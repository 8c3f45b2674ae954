//! # TitleBar Component
//!
//! Top status bar showing session state and notifications.
//!
//! ## Responsibilities
//!
//! - Display the app name and a shortened session id
//! - Display the status line (connection result, "Thinking...")
//! - Show a spinner while a reply is pending
//! - Show "↓ New" when there's unseen content below the scroll position
//!
//! ## Conditional Formatting
//!
//! ```text
//! MindMate [k3j9x0a2b] | Connected to http://localhost:8000
//! MindMate [k3j9x0a2b] | ⠹ Thinking... | ↓ New
//! MindMate [k3j9x0a2b]
//! ```
//!
//! Stateless: every field is a prop, filled in by `draw_ui` each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::components::message_list::spinner;

pub struct TitleBar {
    pub session_label: String,
    pub status_message: String,
    pub is_busy: bool,
    pub spinner_frame: usize,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(session_label: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            session_label,
            status_message,
            is_busy: false,
            spinner_frame: 0,
            has_unseen_content,
        }
    }

    pub fn busy(mut self, spinner_frame: usize) -> Self {
        self.is_busy = true;
        self.spinner_frame = spinner_frame;
        self
    }

    fn text(&self) -> String {
        let mut text = format!("MindMate [{}]", self.session_label);

        let status = match (self.is_busy, self.status_message.is_empty()) {
            (true, true) => Some(spinner(self.spinner_frame).to_string()),
            (true, false) => Some(format!(
                "{} {}",
                spinner(self.spinner_frame),
                self.status_message
            )),
            (false, false) => Some(self.status_message.clone()),
            (false, true) => None,
        };
        if let Some(status) = status {
            text.push_str(" | ");
            text.push_str(&status);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}
