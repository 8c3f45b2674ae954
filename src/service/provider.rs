use std::fmt;

use async_trait::async_trait;

use super::types::{ChatReply, ChatRequest};

/// Errors that can occur while talking to the chat service.
///
/// The conversation controller treats every variant the same way (fallback reply),
/// the variants exist so the log says what actually went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Client could not be constructed (bad TLS backend, invalid settings).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service answered with a non-success status.
    Api { status: u16, message: String },
    /// Success status but the body did not match the expected schema.
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "config error: {msg}"),
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// The remote classification/response service.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Returns a short name for logs.
    fn name(&self) -> &str;

    /// Sends one user message and waits for the classified reply.
    async fn send(&self, request: ChatRequest<'_>) -> Result<ChatReply, ServiceError>;

    /// Probes service liveness.
    async fn health(&self) -> Result<(), ServiceError>;
}
