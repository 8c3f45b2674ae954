//! # Request Driver
//!
//! Performs the I/O that `update()` asks for. The reducer returns
//! `Effect::SpawnRequest`; something has to call the service and feed the
//! outcome back as an `Action`. Two drivers live here:
//!
//! - [`spawn_request`]: fire-and-forget task that reports over a channel.
//!   Used by the TUI event loop, which must keep drawing while waiting.
//! - [`Conversation`]: awaits the outcome inline. Used by tests and any
//!   headless caller that just wants "send this, give me the transcript".
//!
//! Either way every request ends in exactly one `ReplyReceived` or
//! `RequestFailed`, so the controller always leaves `Awaiting`.

use std::sync::{Arc, mpsc};

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::core::action::{Action, Effect, PendingRequest, update};
use crate::core::state::App;
use crate::service::{ChatRequest, ChatService};

/// Send one request and translate the outcome into the action that completes it.
pub async fn request_reply(service: Arc<dyn ChatService>, request: PendingRequest) -> Action {
    let started = std::time::Instant::now();
    let outcome = service
        .send(ChatRequest {
            session_id: &request.session_id,
            message: &request.message,
        })
        .await;
    debug!(
        "{} request finished in {}ms",
        service.name(),
        started.elapsed().as_millis()
    );

    match outcome {
        Ok(reply) => Action::ReplyReceived(reply),
        Err(e) => Action::RequestFailed(e),
    }
}

/// Probe the service once and describe the result for the status line.
pub async fn probe_health(service: &dyn ChatService, base_url: &str) -> String {
    match service.health().await {
        Ok(()) => {
            info!("Health check passed for {}", base_url);
            format!("Connected to {base_url}")
        }
        Err(e) => {
            warn!("Health check failed for {}: {}", base_url, e);
            String::from("Service unreachable")
        }
    }
}

/// Spawn the request on the tokio runtime and deliver its completion on `tx`.
pub fn spawn_request(
    service: Arc<dyn ChatService>,
    request: PendingRequest,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning chat request");
    tokio::spawn(async move {
        let action = request_reply(service, request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver chat completion: receiver dropped");
        }
    })
}

/// Headless conversation: owns an `App` and drives each submission to completion.
pub struct Conversation {
    app: App,
}

impl Conversation {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Submit `text` and wait for the reply (or fallback) to land in the log.
    ///
    /// Returns `false` when the submission was ignored: blank text, or a
    /// request already in flight.
    pub async fn send(&mut self, text: impl Into<String>) -> bool {
        let effect = update(&mut self.app, Action::Submit(text.into()));
        let Effect::SpawnRequest(request) = effect else {
            return false;
        };
        let completion = request_reply(self.app.service.clone(), request).await;
        update(&mut self.app, completion);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{Emotion, FALLBACK_TEXT, Role};
    use crate::service::{ChatReply, ServiceError};
    use crate::test_support::{ScriptedService, test_app_with};

    fn joy(text: &str) -> ChatReply {
        ChatReply {
            response: text.to_string(),
            emotion: Emotion::Joy,
            crisis: false,
            session_id: None,
        }
    }

    #[test]
    fn request_reply_maps_success() {
        let service = Arc::new(ScriptedService::new(vec![Ok(joy("hi"))]));
        let request = PendingRequest {
            session_id: "session_1_abc".into(),
            message: "hello".into(),
        };
        let action = tokio_test::block_on(request_reply(service.clone(), request));
        assert!(matches!(action, Action::ReplyReceived(ref r) if r.response == "hi"));
        assert_eq!(
            service.requests(),
            vec![("session_1_abc".to_string(), "hello".to_string())]
        );
    }

    #[test]
    fn request_reply_maps_failure() {
        let service = Arc::new(ScriptedService::new(vec![Err(ServiceError::Api {
            status: 500,
            message: "boom".into(),
        })]));
        let request = PendingRequest {
            session_id: "s".into(),
            message: "m".into(),
        };
        let action = tokio_test::block_on(request_reply(service, request));
        assert!(matches!(action, Action::RequestFailed(ServiceError::Api { status: 500, .. })));
    }

    #[test]
    fn conversation_appends_user_then_reply() {
        let service = Arc::new(ScriptedService::new(vec![Ok(joy("Glad to hear!"))]));
        let mut convo = Conversation::new(test_app_with(service.clone()));

        assert!(tokio_test::block_on(convo.send("I feel great today")));

        let log = convo.app().log();
        assert_eq!(log.len(), 3);
        assert_eq!(log.all()[1].role, Role::User);
        assert_eq!(log.all()[2].text, "Glad to hear!");
        assert!(!convo.app().is_busy());
        assert_eq!(service.requests()[0].0, convo.app().session_id().as_str());
    }

    #[test]
    fn conversation_falls_back_on_error() {
        let service = Arc::new(ScriptedService::new(vec![Err(ServiceError::Network(
            "connection refused".into(),
        ))]));
        let mut convo = Conversation::new(test_app_with(service));

        assert!(tokio_test::block_on(convo.send("anyone there?")));
        let last = convo.app().log().last().unwrap();
        assert_eq!(last.text, FALLBACK_TEXT);
        assert_eq!(last.emotion, Some(Emotion::Neutral));
        assert!(!convo.app().is_busy());
    }

    #[test]
    fn conversation_ignores_blank_input_without_calling_service() {
        let service = Arc::new(ScriptedService::new(vec![]));
        let mut convo = Conversation::new(test_app_with(service.clone()));
        assert!(!tokio_test::block_on(convo.send("   ")));
        assert!(service.requests().is_empty());
        assert_eq!(convo.app().log().len(), 1);
    }

    #[test]
    fn probe_health_reports_connected() {
        let service = ScriptedService::new(vec![]);
        let status = tokio_test::block_on(probe_health(&service, "http://localhost:8000"));
        assert_eq!(status, "Connected to http://localhost:8000");
    }

    #[test]
    fn probe_health_reports_unreachable() {
        let service = ScriptedService::new(vec![]).unhealthy();
        let status = tokio_test::block_on(probe_health(&service, "http://localhost:8000"));
        assert_eq!(status, "Service unreachable");
    }

    #[tokio::test]
    async fn spawn_request_delivers_completion_over_channel() {
        let service = Arc::new(ScriptedService::new(vec![Ok(joy("pong"))]));
        let (tx, rx) = mpsc::channel();
        let request = PendingRequest {
            session_id: "s".into(),
            message: "ping".into(),
        };
        spawn_request(service, request, tx).await.unwrap();
        let action = rx.try_recv().unwrap();
        assert!(matches!(action, Action::ReplyReceived(ref r) if r.response == "pong"));
    }

    #[tokio::test]
    async fn spawn_request_survives_dropped_receiver() {
        let service = Arc::new(ScriptedService::new(vec![Ok(joy("pong"))]));
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let request = PendingRequest {
            session_id: "s".into(),
            message: "ping".into(),
        };
        assert!(spawn_request(service, request, tx).await.is_ok());
    }
}
