//! # Application State
//!
//! Core business state for MindMate. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<dyn ChatService>  // remote classification/response service
//! ├── session_id: SessionId          // opaque token, fixed for the App's lifetime
//! ├── log: MessageLog                // append-only transcript
//! ├── gate: ConsentGate              // disclaimer visibility + acknowledgment
//! ├── phase: Phase                   // Idle | Awaiting
//! └── status_message: String         // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! The session id, log, and gate are read-only from outside the core.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::consent::ConsentGate;
use crate::core::message_log::MessageLog;
use crate::core::session::{SessionId, new_session_id};
use crate::service::ChatService;

/// Controller phase. At most one request is in flight, and only in `Awaiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Awaiting,
}

pub struct App {
    pub service: Arc<dyn ChatService>,
    pub status_message: String,
    pub(crate) session_id: SessionId,
    pub(crate) log: MessageLog,
    pub(crate) gate: ConsentGate,
    pub(crate) phase: Phase,
}

impl App {
    /// Starts a session: fresh id, welcome-seeded log, consent gate showing.
    pub fn new(service: Arc<dyn ChatService>) -> Self {
        Self {
            service,
            status_message: String::from("Welcome to MindMate"),
            session_id: new_session_id(),
            log: MessageLog::new(),
            gate: ConsentGate::new(),
            phase: Phase::Idle,
        }
    }

    pub fn from_config(service: Arc<dyn ChatService>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(service);
        app.status_message = format!("Connecting to {}", config.base_url);
        app
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn gate(&self) -> &ConsentGate {
        &self.gate
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Busy signal for the submission surface.
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Awaiting
    }
}
