//! # Core Application Logic
//!
//! This module contains MindMate's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • presentation mapping │
//!                    └───────────┬─────────────┘
//!                                │ Effect::SpawnRequest
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  service   │
//!     │  Adapter   │ ── spawn_request() ────▶ │  (HTTP)    │
//!     │ (ratatui)  │ ◀── Action over mpsc ─── │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`controller`]: Drivers that perform the requests `update()` asks for
//! - [`message`] / [`message_log`]: Transcript records and the append-only log
//! - [`presentation`]: Emotion/crisis → label, glyph, style class
//! - [`consent`]: Disclaimer gate
//! - [`session`]: Session id generation
//! - [`config`]: Config file + env + CLI resolution

pub mod action;
pub mod config;
pub mod consent;
pub mod controller;
pub mod message;
pub mod message_log;
pub mod presentation;
pub mod session;
pub mod state;

pub use action::{Action, Effect, update};
pub use state::App;
