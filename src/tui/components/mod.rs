//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as struct fields:
//! - `TitleBar`: Top status bar with session id, status and spinner
//! - `MessageBubble`: One transcript record with emotion styling
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Multi-line text entry
//! - `MessageList`: Scrollable conversation view with layout caching
//! - `ConsentModal`: Disclaimer overlay; captures the keyboard until first acknowledged
//!
//! Components receive external data as props, never by reaching into `App`.
//! `MessageList` renders many `MessageBubble`s.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single record renderer + emotion colors)
//! ├── message_list.rs  (Scrollable transcript + typing indicator)
//! ├── consent.rs       (Disclaimer modal)
//! └── input_box/       (Text input)
//! ```

pub mod consent;
pub mod input_box;
pub mod message;
pub mod message_list;
mod title_bar;

pub use consent::{ConsentEvent, ConsentModal};
pub use input_box::{InputBox, InputEvent};
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
