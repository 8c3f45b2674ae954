pub mod http;
pub mod provider;
pub mod types;

pub use http::HttpChatService;
pub use provider::{ChatService, ServiceError};
pub use types::{ChatReply, ChatRequest, HealthStatus};
