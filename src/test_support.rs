//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::App;
use crate::service::{ChatReply, ChatRequest, ChatService, ServiceError};

/// A service that replays canned outcomes in order and records what it was sent.
///
/// Once the script runs out every call fails with a network error.
pub struct ScriptedService {
    script: Mutex<VecDeque<Result<ChatReply, ServiceError>>>,
    requests: Mutex<Vec<(String, String)>>,
    healthy: bool,
}

impl ScriptedService {
    pub fn new(script: Vec<Result<ChatReply, ServiceError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            healthy: true,
        }
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// `(session_id, message)` pairs in send order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send(&self, request: ChatRequest<'_>) -> Result<ChatReply, ServiceError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.session_id.to_string(), request.message.to_string()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Network("script exhausted".into())))
    }

    async fn health(&self) -> Result<(), ServiceError> {
        if self.healthy {
            Ok(())
        } else {
            Err(ServiceError::Network("service down".into()))
        }
    }
}

/// Creates a test App whose service has nothing scripted.
pub fn test_app() -> App {
    App::new(Arc::new(ScriptedService::new(Vec::new())))
}

pub fn test_app_with(service: Arc<ScriptedService>) -> App {
    App::new(service)
}
