//! # Actions
//!
//! Everything that can happen in MindMate becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Service responds? That's `Action::ReplyReceived(reply)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Controller phases
//!
//! ```text
//!            Submit(text), non-blank
//!   ┌──────┐ ───────────────────────────▶ ┌──────────┐
//!   │ Idle │                              │ Awaiting │
//!   └──────┘ ◀─────────────────────────── └──────────┘
//!            ReplyReceived / RequestFailed
//! ```
//!
//! Submissions while `Awaiting` are dropped, not queued. Every accepted user
//! record is followed by exactly one assistant record before the next one.

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::state::{App, Phase};
use crate::service::{ChatReply, ServiceError};

#[derive(Debug)]
pub enum Action {
    /// User submitted text from the input box.
    Submit(String),
    /// The in-flight request completed with a reply.
    ReplyReceived(ChatReply),
    /// The in-flight request failed in any way.
    RequestFailed(ServiceError),
    /// Show the disclaimer again.
    OpenConsent,
    /// Close the disclaimer (acknowledges it).
    DismissConsent,
    Quit,
}

/// The one request a submission produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Caller must send this request and feed the outcome back as an action.
    SpawnRequest(PendingRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }
            if app.phase == Phase::Awaiting {
                debug!("Ignoring submission while a request is in flight");
                return Effect::None;
            }

            info!("Submitting message (len={})", text.len());
            app.log.append(Message::user(text.clone()));
            app.phase = Phase::Awaiting;
            app.status_message = String::from("Thinking...");

            Effect::SpawnRequest(PendingRequest {
                session_id: app.session_id.as_str().to_string(),
                message: text,
            })
        }
        Action::ReplyReceived(reply) => {
            if app.phase != Phase::Awaiting {
                warn!("Dropping reply received while idle");
                return Effect::None;
            }

            if reply.crisis {
                warn!("Service flagged crisis-level content (emotion={})", reply.emotion.as_str());
            } else {
                info!("Reply received (emotion={})", reply.emotion.as_str());
            }
            app.log
                .append(Message::assistant(reply.response, reply.emotion, reply.crisis));
            app.phase = Phase::Idle;
            app.status_message.clear();
            Effect::None
        }
        Action::RequestFailed(err) => {
            if app.phase != Phase::Awaiting {
                warn!("Dropping failure received while idle: {}", err);
                return Effect::None;
            }

            warn!("Chat request failed, using fallback reply: {}", err);
            app.log.append(Message::fallback());
            app.phase = Phase::Idle;
            app.status_message.clear();
            Effect::None
        }
        Action::OpenConsent => {
            app.gate.open();
            Effect::None
        }
        Action::DismissConsent => {
            if !app.gate.is_acknowledged() {
                info!("Disclaimer acknowledged");
            }
            app.gate.dismiss();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
