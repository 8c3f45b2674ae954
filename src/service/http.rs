//! HTTP implementation of [`ChatService`] against the MindMate API.
//!
//! - `POST {base_url}/chat` with `{session_id, message}`
//! - `GET {base_url}/health`
//!
//! Any non-2xx status, transport failure, or schema mismatch comes back
//! as a [`ServiceError`]; the caller decides how to recover.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::service::{ChatReply, ChatRequest, ChatService, HealthStatus, ServiceError};

/// Chat service reached over plain HTTP (JSON in, JSON out).
pub struct HttpChatService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatService {
    /// Builds a client for `base_url` with a transport-level timeout.
    /// A trailing slash on the URL is ignored.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Reads the error body of a failed response, tolerating unreadable bodies.
async fn api_error(response: reqwest::Response) -> ServiceError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    ServiceError::Api { status, message }
}

#[async_trait]
impl ChatService for HttpChatService {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, request: ChatRequest<'_>) -> Result<ChatReply, ServiceError> {
        info!(
            "POST {}/chat (session={}, message_len={})",
            self.base_url,
            request.session_id,
            request.message.len()
        );

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        debug!("Chat response status: {}", response.status());

        if !response.status().is_success() {
            let err = api_error(response).await;
            warn!("Chat service error: {}", err);
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let reply: ChatReply =
            serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))?;

        if let Some(echoed) = reply.session_id.as_deref()
            && echoed != request.session_id
        {
            warn!(
                "Service echoed session id {} for request from {}",
                echoed, request.session_id
            );
        }

        debug!(
            "Chat reply: emotion={}, crisis={}, len={}",
            reply.emotion.as_str(),
            reply.crisis,
            reply.response.len()
        );
        Ok(reply)
    }

    async fn health(&self) -> Result<(), ServiceError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let status: HealthStatus = response.json().await.unwrap_or_default();
        info!("Health check ok (status={:?})", status.status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let service = HttpChatService::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(service.base_url(), "http://localhost:8000");
    }

    #[test]
    fn name_is_http() {
        let service = HttpChatService::new("http://localhost:8000", Duration::from_secs(5)).unwrap();
        assert_eq!(service.name(), "http");
    }
}
