//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! ```text
//! Ctrl+C ───────────────────────────────▶ Action::Quit (always)
//! first disclaimer? ── Enter/Esc ───────▶ Action::DismissConsent
//!                   └─ anything else ───▶ swallowed
//! reopened disclaimer? ── Esc/F1 ───────▶ Action::DismissConsent
//!                      └─ anything else ▶ falls through below
//! F1 ───────────────────────────────────▶ Action::OpenConsent
//! Up/Down/PgUp/PgDn/wheel ──────────────▶ MessageListState
//! Esc ──────────────────────────────────▶ Action::Quit
//! everything else ──────────────────────▶ InputBox ─ Submit ─▶ Action::Submit
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Busy** (reply pending): draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, log changes, or
//!   terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller::{probe_health, spawn_request};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{ConsentEvent, ConsentModal, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is pushed unconditionally; terminals that
        // don't support it ignore the sequence
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// What the event loop should do after routing one terminal event.
#[derive(Debug, PartialEq)]
enum Routed {
    Continue,
    Quit,
}

/// Route a terminal event to the modal, the message list, the input box, or core.
fn route_event(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
) -> Routed {
    if matches!(event, TuiEvent::Resize) {
        return Routed::Continue;
    }
    if matches!(event, TuiEvent::ForceQuit) {
        return apply(app, Action::Quit, tx);
    }

    let gate = app.gate();
    if gate.is_visible() {
        let blocking = gate.blocks_input();
        if let Some(ConsentEvent::Dismiss) = ConsentModal::new(!blocking).handle_event(event) {
            return apply(app, Action::DismissConsent, tx);
        }
        // First showing owns the keyboard; a reopened one is read-only
        if blocking {
            return Routed::Continue;
        }
    }

    match event {
        TuiEvent::ShowDisclaimer => apply(app, Action::OpenConsent, tx),
        TuiEvent::Escape => apply(app, Action::Quit, tx),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(event);
            Routed::Continue
        }
        _ => {
            tui.input_box.busy = app.is_busy();
            match tui.input_box.handle_event(event) {
                Some(InputEvent::Submit(text)) => apply(app, Action::Submit(text), tx),
                Some(InputEvent::ContentChanged) | None => Routed::Continue,
            }
        }
    }
}

/// Run an action through `update` and perform whatever effect it asks for.
fn apply(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> Routed {
    match update(app, action) {
        Effect::None => Routed::Continue,
        Effect::SpawnRequest(request) => {
            spawn_request(app.service.clone(), request, tx.clone());
            Routed::Continue
        }
        Effect::Quit => Routed::Quit,
    }
}

/// Show the startup health result once no reply is pending.
///
/// While `Awaiting` the status line belongs to the request, so the result is
/// held until the app is idle again.
fn settle_health_status(app: &mut App, pending: &mut Option<String>) -> bool {
    if app.is_busy() {
        return false;
    }
    match pending.take() {
        Some(status) => {
            app.status_message = status;
            true
        }
        None => false,
    }
}

pub fn run(mut app: App, config: &ResolvedConfig, health_check: bool) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    // Channel for the startup health probe result (status line only)
    let (status_tx, status_rx) = mpsc::channel::<String>();

    if health_check {
        let service = app.service.clone();
        let base_url = config.base_url.clone();
        tokio::spawn(async move {
            let status = probe_health(service.as_ref(), &base_url).await;
            let _ = status_tx.send(status);
        });
    } else {
        info!("Skipping health check");
        drop(status_tx);
    }

    let mut log_changes = app.log().subscribe();
    let mut pending_status: Option<String> = None;

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Log changes drive auto-scroll and the unseen indicator
        if log_changes.has_changed().unwrap_or(false) {
            let count = *log_changes.borrow_and_update();
            tui.message_list.on_log_changed(count);
            needs_redraw = true;
        }

        if let Ok(status) = status_rx.try_recv() {
            pending_status = Some(status);
        }
        if settle_health_status(&mut app, &mut pending_status) {
            needs_redraw = true;
        }

        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if route_event(&event, &mut app, &mut tui, &tx) == Routed::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle completions from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, action, &tx) == Routed::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    info!(
        "MindMate shutting down ({} messages sent, {} replies)",
        app.log().user_count(),
        app.log().reply_count()
    );
    if app.is_busy() {
        warn!("Exiting with a reply still pending; it will be dropped");
    }

    ratatui::restore();
    Ok(())
}
